use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::Result;
use crate::models::{AggregationMode, SiteConfig};
use crate::utils::constants::{
    DEFAULT_DATA_SOURCE, DEFAULT_ELEVATION_M, DEFAULT_LATITUDE_DEG, ENV_PREFIX,
};

/// Everything the pipeline needs to know before it starts.
///
/// Layered from built-in defaults, an optional settings file, then
/// `ETO_*` environment variables. Command line flags are applied on top
/// with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    /// URL or local path of the station file
    #[validate(length(min = 1))]
    pub data_source: String,

    #[validate(nested)]
    pub site: SiteConfig,

    #[serde(default)]
    pub aggregation: AggregationMode,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("data_source", DEFAULT_DATA_SOURCE)?
            .set_default("site.elevation_m", DEFAULT_ELEVATION_M)?
            .set_default("site.latitude_deg", DEFAULT_LATITUDE_DEG)?
            .set_default("aggregation", AggregationMode::default().to_string())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_data_source(mut self, data_source: Option<String>) -> Self {
        if let Some(source) = data_source {
            self.data_source = source;
        }
        self
    }

    pub fn with_elevation(mut self, elevation_m: Option<f64>) -> Self {
        if let Some(elevation) = elevation_m {
            self.site.elevation_m = elevation;
        }
        self
    }

    pub fn with_latitude(mut self, latitude_deg: Option<f64>) -> Self {
        if let Some(latitude) = latitude_deg {
            self.site.latitude_deg = latitude;
        }
        self
    }

    pub fn with_aggregation(mut self, aggregation: Option<AggregationMode>) -> Self {
        if let Some(mode) = aggregation {
            self.aggregation = mode;
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            site: SiteConfig::default(),
            aggregation: AggregationMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_settings_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "data_source = \"station.csv\"")?;
        writeln!(file, "aggregation = \"day-of-year\"")?;
        writeln!(file, "[site]")?;
        writeln!(file, "elevation_m = 1200.0")?;
        writeln!(file, "latitude_deg = 40.5")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.data_source, "station.csv");
        assert_eq!(settings.site, SiteConfig::new(1200.0, 40.5));
        assert_eq!(settings.aggregation, AggregationMode::DayOfYear);
        Ok(())
    }

    #[test]
    fn test_settings_file_out_of_range() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[site]")?;
        writeln!(file, "elevation_m = 100.0")?;
        writeln!(file, "latitude_deg = 123.0")?;

        assert!(Settings::load(Some(file.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_flag_overrides() {
        let settings = Settings::default()
            .with_data_source(Some("local.csv".to_string()))
            .with_elevation(Some(10.0))
            .with_latitude(None)
            .with_aggregation(Some(AggregationMode::DayOfYear));

        assert_eq!(settings.data_source, "local.csv");
        assert_eq!(settings.site.elevation_m, 10.0);
        assert_eq!(settings.site.latitude_deg, DEFAULT_LATITUDE_DEG);
        assert_eq!(settings.aggregation, AggregationMode::DayOfYear);
    }
}
