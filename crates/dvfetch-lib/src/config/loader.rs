use super::Config;
use super::model::{DATAVERSE_GET_URL, DATAVERSE_METADATA_URL, DownloadConfig};
use crate::error::DvFetchError;
use config::Config as ConfigBuilder;

/// Loads the configuration, layering an optional file over built-in defaults.
pub fn load_config(config_path: Option<&str>) -> Result<Config, DvFetchError> {
    let defaults = DownloadConfig::default();

    let mut builder = ConfigBuilder::builder()
        .set_default("endpoints.download_url", DATAVERSE_GET_URL)?
        .set_default("endpoints.metadata_url", DATAVERSE_METADATA_URL)?
        .set_default("download.block_size", defaults.block_size as u64)?
        .set_default("download.verify_checksum", defaults.verify_checksum)?
        .set_default("download.metadata_timeout_secs", defaults.metadata_timeout_secs)?;

    if let Some(config_path) = config_path {
        builder = builder.add_source(config::File::with_name(config_path));
    }

    builder.build()?.try_deserialize().map_err(Into::into)
}
