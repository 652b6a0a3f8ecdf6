pub mod daily;
pub mod observation;
pub mod site;

pub use daily::{DailyAggregate, DailyRecord, DailyRow, EtoTerms};
pub use observation::{Channel, FillPolicy, Observation, RawObservation};
pub use site::{AggregationMode, SiteConfig};
