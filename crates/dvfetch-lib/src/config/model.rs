use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DATAVERSE_GET_URL: &str = "https://dataverse.harvard.edu/api/access/datafile/";
pub const DATAVERSE_METADATA_URL: &str = "https://dataverse.harvard.edu/api/files/{id}/metadata";

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub endpoints: EndpointConfig,
    pub download: DownloadConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// Prefix the file identifier is appended to
    pub download_url: String,
    /// Metadata endpoint; `{id}` is replaced with the file identifier
    pub metadata_url: String,
}

impl EndpointConfig {
    pub fn download_url_for(&self, id: &str) -> String {
        format!("{}{}", self.download_url, id)
    }

    pub fn metadata_url_for(&self, id: &str) -> String {
        self.metadata_url.replace("{id}", id)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            download_url: DATAVERSE_GET_URL.to_string(),
            metadata_url: DATAVERSE_METADATA_URL.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DownloadConfig {
    pub block_size: usize,
    pub verify_checksum: bool,
    /// Unset means no timeout on datafile requests
    pub request_timeout_secs: Option<u64>,
    pub metadata_timeout_secs: u64,
}

impl DownloadConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            block_size: 1024,
            verify_checksum: false,
            request_timeout_secs: None,
            metadata_timeout_secs: 30,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
}
