pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod logger;
pub mod table;
pub mod verification;

pub use config::Config;
pub use download::DataverseFetcher;
pub use error::DvFetchError;
pub use logger::{FetchLogger, SilentLogger, TracingLogger};
pub use table::{DatasetRecord, DatasetTable, TableSource};
