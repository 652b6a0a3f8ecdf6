use crate::error::{ProcessingError, Result};
use crate::models::{Channel, RawObservation};
use crate::readers::DataSource;
use crate::utils::constants::{COL_DOY, COL_TIME, COL_YEAR};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use tracing::debug;

/// Reads the delimited station file into raw rows.
pub struct ObservationReader {
    delimiter: u8,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Load every row from a data source. Any malformed row fails the load.
    pub fn read_source(&self, source: &DataSource) -> Result<Vec<RawObservation>> {
        let reader = source.open()?;
        self.read_observations(reader)
    }

    pub fn read_observations<R: Read>(&self, reader: R) -> Result<Vec<RawObservation>> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        self.check_headers(csv_reader.headers()?)?;

        let mut observations = Vec::new();
        for result in csv_reader.deserialize() {
            let observation: RawObservation = result?;
            observations.push(observation);
        }

        debug!(rows = observations.len(), "parsed station rows");
        Ok(observations)
    }

    fn check_headers(&self, headers: &csv::StringRecord) -> Result<()> {
        let required = [COL_YEAR, COL_DOY, COL_TIME]
            .into_iter()
            .chain(Channel::ALL.iter().map(|c| c.column()));

        let missing: Vec<&str> = required
            .filter(|name| !headers.iter().any(|h| h == *name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ProcessingError::InvalidFormat(format!(
                "station file is missing columns: {}",
                missing.join(", ")
            )))
        }
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
