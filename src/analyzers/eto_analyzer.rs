use crate::error::{ProcessingError, Result};
use crate::models::DailyRecord;
use crate::writers::ParquetWriter;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtoStatistics {
    pub total_days: usize,
    pub date_range: (NaiveDate, NaiveDate),
    pub defined_days: usize,
    pub undefined_days: usize,
    pub eto: EtoSummary,
    pub total_rainfall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtoSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl EtoStatistics {
    pub fn defined_percentage(&self) -> f64 {
        (self.defined_days as f64 / self.total_days as f64) * 100.0
    }

    pub fn summary(&self) -> String {
        let eto_range = match (self.eto.min_date, self.eto.max_date) {
            (Some(min_date), Some(max_date)) => format!(
                "{:.2} mm ({}) to {:.2} mm ({})",
                self.eto.min, min_date, self.eto.max, max_date
            ),
            _ => "No defined days".to_string(),
        };

        format!(
            "Date Range: {} to {} ({} days)\n\
            Defined ETo: {}/{} days ({:.1}%), {} undefined\n\
            ETo Range: {}\n\
            ETo Mean: {:.2} mm/day\n\
            ETo Total: {:.1} mm\n\
            Rainfall Total: {:.1} mm",
            self.date_range.0,
            self.date_range.1,
            self.total_days,
            self.defined_days,
            self.total_days,
            self.defined_percentage(),
            self.undefined_days,
            eto_range,
            self.eto.mean,
            self.eto.total,
            self.total_rainfall,
        )
    }
}

pub struct EtoAnalyzer;

impl EtoAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_parquet(&self, path: &Path) -> Result<EtoStatistics> {
        self.analyze_parquet_with_limit(path, 0)
    }

    /// Analyze the first `limit` days of a daily Parquet file (0 reads all).
    pub fn analyze_parquet_with_limit(&self, path: &Path, limit: usize) -> Result<EtoStatistics> {
        let records = ParquetWriter::new().read_records(path, limit)?;
        self.analyze(&records)
    }

    pub fn analyze(&self, records: &[DailyRecord]) -> Result<EtoStatistics> {
        let (first, last) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ProcessingError::MissingData(
                    "No daily records to analyze".to_string(),
                ))
            }
        };

        let mut min_date = first.date();
        let mut max_date = last.date();
        let mut eto_min = f64::INFINITY;
        let mut eto_max = f64::NEG_INFINITY;
        let mut eto_min_date = None;
        let mut eto_max_date = None;
        let mut eto_total = 0.0;
        let mut defined = 0;
        let mut total_rainfall = 0.0;

        for record in records {
            min_date = min_date.min(record.date());
            max_date = max_date.max(record.date());

            if record.aggregate.rainfall.is_finite() {
                total_rainfall += record.aggregate.rainfall;
            }

            if !record.has_defined_eto() {
                continue;
            }
            let eto = record.eto();
            defined += 1;
            eto_total += eto;
            if eto < eto_min {
                eto_min = eto;
                eto_min_date = Some(record.date());
            }
            if eto > eto_max {
                eto_max = eto;
                eto_max_date = Some(record.date());
            }
        }

        let (mean, min, max) = if defined > 0 {
            (eto_total / defined as f64, eto_min, eto_max)
        } else {
            (f64::NAN, f64::NAN, f64::NAN)
        };

        Ok(EtoStatistics {
            total_days: records.len(),
            date_range: (min_date, max_date),
            defined_days: defined,
            undefined_days: records.len() - defined,
            eto: EtoSummary {
                mean,
                min,
                max,
                total: eto_total,
                min_date: eto_min_date,
                max_date: eto_max_date,
            },
            total_rainfall,
        })
    }
}

impl Default for EtoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
