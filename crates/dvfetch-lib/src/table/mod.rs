mod reader;
mod types;

pub use reader::{REQUIRED_COLUMNS, TableSource};
pub use types::{DatasetRecord, DatasetTable};
