//! Rebuilds a proper timestamp index from the Year / DOY / Time columns.
//!
//! The station encodes time of day as an integer without a separator
//! (`115` is 01:15). The last reading of the day is stamped `2400`, which is
//! moved to 23:59 so it stays in the day it was measured.

use crate::error::{ProcessingError, Result};
use crate::models::{Observation, RawObservation};
use crate::utils::constants::{END_OF_DAY_TIME, MAX_ENCODED_TIME, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use tracing::debug;

/// Render an encoded time of day as zero-padded `HH:MM`.
pub fn normalize_time(raw: u32) -> Result<String> {
    if raw > MAX_ENCODED_TIME {
        return Err(ProcessingError::InvalidTime(raw));
    }
    if raw == MAX_ENCODED_TIME {
        return Ok(END_OF_DAY_TIME.to_string());
    }

    let digits = format!("{:0>4}", raw);
    Ok(format!("{}:{}", &digits[..2], &digits[2..]))
}

/// Parse year, ordinal day and `HH:MM` into a timestamp.
pub fn parse_timestamp(
    year: i32,
    day_of_year: u32,
    time: &str,
) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    let value = format!("{:04}-{:03} {}", year, day_of_year, time);
    NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT)
}

/// Turn raw rows into timestamped observations sorted by time.
///
/// A single unparsable row fails the whole load.
pub fn normalize(raw: &[RawObservation]) -> Result<Vec<Observation>> {
    let mut observations = Vec::with_capacity(raw.len());

    for (index, row) in raw.iter().enumerate() {
        let time = normalize_time(row.time)?;
        let timestamp = parse_timestamp(row.year, row.day_of_year, &time).map_err(|source| {
            ProcessingError::TimestampParse {
                row: index + 1,
                value: format!("{}-{} {}", row.year, row.day_of_year, time),
                source,
            }
        })?;
        observations.push(Observation::from_raw(row, timestamp));
    }

    // Stable, so duplicate stamps keep file order
    observations.sort_by_key(|o| o.timestamp);

    debug!(rows = observations.len(), "built timestamp index");
    Ok(observations)
}
