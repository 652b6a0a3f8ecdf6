pub mod data_source;
pub mod observation_reader;

pub use data_source::DataSource;
pub use observation_reader::ObservationReader;
