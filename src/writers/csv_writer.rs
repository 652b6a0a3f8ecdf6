use crate::error::Result;
use crate::models::{DailyRecord, DailyRow};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes the daily table as comma-separated text, one column per quantity.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_records(&self, records: &[DailyRecord], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(records, file)?;
        info!(path = %path.display(), rows = records.len(), "wrote CSV");
        Ok(())
    }

    pub fn write_to<W: Write>(&self, records: &[DailyRecord], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for record in records {
            csv_writer.serialize(DailyRow::from(record))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
