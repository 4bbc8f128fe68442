mod loader;
mod model;

pub use loader::load_config;
pub use model::{
    Config, DATAVERSE_GET_URL, DATAVERSE_METADATA_URL, DownloadConfig, EndpointConfig,
    OutputConfig,
};
