use crate::error::Result;
use crate::models::{DailyAggregate, DailyRecord, Observation, RawObservation};
use crate::processors::{
    time_normalizer, DailyAggregator, EtoEngine, QualityFilter, QualityReport,
};
use crate::readers::{DataSource, ObservationReader};
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use std::io::Read;
use tracing::info;
use validator::Validate;

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<DailyRecord>,
    pub quality: QualityReport,
}

/// Load → timestamp → clean → aggregate → ETo, for one station.
///
/// Each stage takes the previous stage's table by reference and returns a
/// new one.
pub struct Pipeline {
    settings: Settings,
    verbose: bool,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            verbose: false,
        })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run against the configured data source.
    pub fn run(&self, progress: Option<&ProgressReporter>) -> Result<PipelineOutput> {
        let raw = self.load(progress)?;
        self.run_raw(&raw, progress)
    }

    /// Run against an already opened CSV stream.
    pub fn run_reader<R: Read>(
        &self,
        reader: R,
        progress: Option<&ProgressReporter>,
    ) -> Result<PipelineOutput> {
        let raw = ObservationReader::new().read_observations(reader)?;
        self.run_raw(&raw, progress)
    }

    pub fn load(&self, progress: Option<&ProgressReporter>) -> Result<Vec<RawObservation>> {
        if let Some(p) = progress {
            p.set_message("Loading station data...");
        }
        let source = DataSource::parse(&self.settings.data_source);
        let raw = ObservationReader::new().read_source(&source)?;
        info!(rows = raw.len(), source = %source, "loaded station data");
        Ok(raw)
    }

    /// Timestamp and clean without aggregating.
    pub fn clean(
        &self,
        raw: &[RawObservation],
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<Observation>, QualityReport)> {
        if let Some(p) = progress {
            p.set_message("Building timestamp index...");
        }
        let observations = time_normalizer::normalize(raw)?;

        if let Some(p) = progress {
            p.set_message("Filtering implausible readings...");
        }
        let (cleaned, quality) = QualityFilter::new()
            .with_verbose(self.verbose)
            .clean(&observations);
        info!(
            readings = quality.total_readings,
            rejected = quality.total_rejected(),
            zeros = quality.total_zero_readings(),
            "cleaned observations"
        );

        Ok((cleaned, quality))
    }

    pub fn aggregate(&self, observations: &[Observation]) -> Result<Vec<DailyAggregate>> {
        DailyAggregator::new()
            .with_mode(self.settings.aggregation)
            .aggregate(observations)
    }

    fn run_raw(
        &self,
        raw: &[RawObservation],
        progress: Option<&ProgressReporter>,
    ) -> Result<PipelineOutput> {
        let (cleaned, quality) = self.clean(raw, progress)?;

        if let Some(p) = progress {
            p.set_message("Aggregating to daily values...");
        }
        let days = self.aggregate(&cleaned)?;

        if let Some(p) = progress {
            p.set_message("Computing reference evapotranspiration...");
        }
        let records = EtoEngine::new(&self.settings.site).compute(&days);

        Ok(PipelineOutput { records, quality })
    }
}
