#[cfg(feature = "plotting")]
pub mod chart;
pub mod csv_writer;
pub mod parquet_writer;
pub mod schema;

#[cfg(feature = "plotting")]
pub use chart::EtoChart;
pub use csv_writer::CsvWriter;
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
