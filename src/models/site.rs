use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::utils::constants::{DEFAULT_ELEVATION_M, DEFAULT_LATITUDE_DEG};

/// Fixed geographic constants of the measuring station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SiteConfig {
    /// Metres above sea level
    #[validate(range(min = -500.0, max = 9000.0))]
    pub elevation_m: f64,

    /// Degrees north (negative south)
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude_deg: f64,
}

impl SiteConfig {
    pub fn new(elevation_m: f64, latitude_deg: f64) -> Self {
        Self {
            elevation_m,
            latitude_deg,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ELEVATION_M, DEFAULT_LATITUDE_DEG)
    }
}

/// How daily minima and maxima are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationMode {
    /// Same midnight-aligned bucket as the daily means
    #[default]
    CalendarDay,
    /// Grouped by the DOY column and matched to buckets by position
    DayOfYear,
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::CalendarDay => write!(f, "calendar-day"),
            AggregationMode::DayOfYear => write!(f, "day-of-year"),
        }
    }
}
