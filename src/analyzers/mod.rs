pub mod eto_analyzer;

pub use eto_analyzer::{EtoAnalyzer, EtoStatistics, EtoSummary};
