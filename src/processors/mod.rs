pub mod daily_aggregator;
pub mod eto_engine;
pub mod pipeline;
pub mod quality_filter;
pub mod time_normalizer;

pub use daily_aggregator::DailyAggregator;
pub use eto_engine::{AtmosphericConstants, EtoEngine};
pub use pipeline::{Pipeline, PipelineOutput};
pub use quality_filter::{ChannelStatistics, QualityFilter, QualityReport, Rejection};
pub use time_normalizer::{normalize_time, parse_timestamp};
