use crate::error::{ProcessingError, Result};
use crate::models::{DailyRecord, DailyRow};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use crate::writers::schema::{
    DATE_COLUMN, DAY_OF_YEAR_COLUMN, FLOAT_COLUMNS, SAMPLE_COUNT_COLUMN, YEAR_COLUMN,
};
use arrow::array::{
    Array, ArrayRef, Date32Array, Float64Array, Int32Array, UInt32Array, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Days between 0001-01-01 and 1970-01-01, for Arrow's Date32
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub struct ParquetWriter {
    compression: Compression,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    /// Write the daily table to a Parquet file
    pub fn write_records(&self, records: &[DailyRecord], path: &Path) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let schema = self.create_schema();
        let rows: Vec<DailyRow> = records.iter().map(DailyRow::from).collect();
        let batch = self.rows_to_batch(&rows, schema.clone())?;

        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(DEFAULT_ROW_GROUP_SIZE)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        info!(path = %path.display(), rows = rows.len(), "wrote Parquet");
        Ok(())
    }

    fn create_schema(&self) -> Arc<Schema> {
        let mut fields = vec![
            Field::new(DATE_COLUMN, DataType::Date32, false),
            Field::new(YEAR_COLUMN, DataType::Int32, false),
            Field::new(DAY_OF_YEAR_COLUMN, DataType::UInt32, false),
            Field::new(SAMPLE_COUNT_COLUMN, DataType::UInt64, false),
        ];
        fields.extend(
            FLOAT_COLUMNS
                .iter()
                .map(|c| Field::new(c.name, DataType::Float64, false)),
        );

        Arc::new(Schema::new(fields))
    }

    fn rows_to_batch(&self, rows: &[DailyRow], schema: Arc<Schema>) -> Result<RecordBatch> {
        let dates: Vec<i32> = rows
            .iter()
            .map(|r| r.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect();
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        let days: Vec<u32> = rows.iter().map(|r| r.day_of_year).collect();
        let counts: Vec<u64> = rows.iter().map(|r| r.sample_count).collect();

        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(Date32Array::from(dates)),
            Arc::new(Int32Array::from(years)),
            Arc::new(UInt32Array::from(days)),
            Arc::new(UInt64Array::from(counts)),
        ];
        for column in FLOAT_COLUMNS {
            let values: Vec<f64> = rows.iter().map(|r| (column.get)(r)).collect();
            columns.push(Arc::new(Float64Array::from(values)));
        }

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    /// Read up to `limit` rows back from a file written by this writer
    /// (0 reads everything).
    pub fn read_records(&self, path: &Path, limit: usize) -> Result<Vec<DailyRecord>> {
        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut records = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;

            let dates = column::<Date32Array>(&batch, DATE_COLUMN)?;
            let years = column::<Int32Array>(&batch, YEAR_COLUMN)?;
            let days = column::<UInt32Array>(&batch, DAY_OF_YEAR_COLUMN)?;
            let counts = column::<UInt64Array>(&batch, SAMPLE_COUNT_COLUMN)?;
            let floats = FLOAT_COLUMNS
                .iter()
                .map(|c| column::<Float64Array>(&batch, c.name))
                .collect::<Result<Vec<_>>>()?;

            for i in 0..batch.num_rows() {
                if limit > 0 && records.len() >= limit {
                    return Ok(records);
                }

                let date = NaiveDate::from_num_days_from_ce_opt(
                    dates.value(i) + UNIX_EPOCH_DAYS_FROM_CE,
                )
                .ok_or_else(|| {
                    ProcessingError::InvalidFormat(format!("Invalid date in row {}", i))
                })?;

                let mut row = DailyRow::empty(date, years.value(i), days.value(i), counts.value(i));
                for (spec, values) in FLOAT_COLUMNS.iter().zip(&floats) {
                    (spec.set)(&mut row, values.value(i));
                }
                records.push(DailyRecord::from(row));
            }
        }

        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let row_groups = metadata.num_row_groups();
        let total_rows = file_metadata.num_rows();
        let file_size = std::fs::metadata(path)?.len();
        let compression = if row_groups > 0 && metadata.row_group(0).num_columns() > 0 {
            metadata.row_group(0).column(0).compression()
        } else {
            self.compression
        };

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            file_size,
            compression,
        })
    }
}

fn column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| ProcessingError::InvalidFormat(format!("Invalid {} column", name)))
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyAggregate, EtoTerms};
    use tempfile::NamedTempFile;

    fn record(day: u32, eto: f64) -> DailyRecord {
        let date = NaiveDate::from_ymd_opt(2018, 5, day).unwrap();
        let empty = DailyRecord::from(DailyRow::empty(date, 2018, 120 + day, 96));
        DailyRecord {
            aggregate: DailyAggregate {
                wind_speed: 2.5,
                rainfall: 0.0,
                ..empty.aggregate
            },
            terms: EtoTerms {
                eto,
                net_radiation: 12.0,
                ..empty.terms
            },
        }
    }

    #[test]
    fn test_write_empty_records() {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new().unwrap();

        let result = writer.write_records(&[], temp_file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        writer.write_records(&[record(1, 4.5), record(2, 5.0)], temp_file.path())?;
        let records = writer.read_records(temp_file.path(), 0)?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date(), NaiveDate::from_ymd_opt(2018, 5, 1).unwrap());
        assert_eq!(records[0].aggregate.day_of_year, 121);
        assert_eq!(records[1].eto(), 5.0);
        assert_eq!(records[1].terms.net_radiation, 12.0);
        assert!(records[1].terms.delta.is_nan());

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 2);
        Ok(())
    }

    #[test]
    fn test_read_limit() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;
        let records: Vec<DailyRecord> = (1..=5).map(|d| record(d, d as f64)).collect();

        writer.write_records(&records, temp_file.path())?;

        assert_eq!(writer.read_records(temp_file.path(), 3)?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let compressions = ["snappy", "gzip", "lz4", "zstd", "none"];

        for compression in &compressions {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new().unwrap();

            let result = writer.write_records(&[record(1, 4.0)], temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        assert!(ParquetWriter::new().with_compression("brotli9").is_err());
        Ok(())
    }
}
