use crate::verification::VerificationOutcome;
use std::path::{Path, PathBuf};

/// Where a record comes from and where it lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRecord {
    pub url: String,
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadStatus {
    /// The target path existed before the call; nothing was fetched.
    AlreadyPresent,
    Downloaded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordOutcome {
    pub resolved: ResolvedRecord,
    pub status: DownloadStatus,
    /// `None` when verification was not requested.
    pub verification: Option<VerificationOutcome>,
}

impl RecordOutcome {
    pub fn url(&self) -> &str {
        &self.resolved.url
    }

    pub fn filename(&self) -> &str {
        &self.resolved.filename
    }

    pub fn path(&self) -> &Path {
        &self.resolved.path
    }

    pub fn was_downloaded(&self) -> bool {
        self.status == DownloadStatus::Downloaded
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub outcomes: Vec<RecordOutcome>,
}

impl FetchSummary {
    pub fn downloaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.was_downloaded()).count()
    }

    pub fn already_present(&self) -> usize {
        self.outcomes.len() - self.downloaded()
    }

    /// Records whose verification ran and did not pass.
    pub fn failed_verification(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| {
            o.verification
                .as_ref()
                .is_some_and(|verification| !verification.passed())
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FetchOptions {
    pub verify_checksum: bool,
    /// Show progress bars and emit log lines
    pub verbose: bool,
    pub block_size: usize,
    pub request_timeout: Option<std::time::Duration>,
    pub metadata_timeout: std::time::Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            verify_checksum: false,
            verbose: true,
            block_size: 1024,
            request_timeout: None,
            metadata_timeout: std::time::Duration::from_secs(30),
        }
    }
}

impl From<&crate::config::DownloadConfig> for FetchOptions {
    fn from(config: &crate::config::DownloadConfig) -> Self {
        Self {
            verify_checksum: config.verify_checksum,
            verbose: true,
            block_size: config.block_size,
            request_timeout: config.request_timeout(),
            metadata_timeout: config.metadata_timeout(),
        }
    }
}
