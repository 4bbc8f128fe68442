use super::checksum::{ChecksumAlgorithm, VerificationError, calculate_md5_checksum, verify_hex_digest};
use super::metadata::{MetadataResponse, RemoteMetadata};
use crate::config::EndpointConfig;
use crate::logger::FetchLogger;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Result of comparing a local file against its remote checksum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    Mismatch { expected: String, actual: String },
    /// No usable remote checksum; counts as a pass.
    Skipped { reason: String },
    MissingFile,
    /// The local file could not be hashed.
    Unreadable { reason: String },
}

impl VerificationOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Verified | Self::Skipped { .. })
    }
}

#[derive(Clone)]
pub struct ChecksumVerifier {
    client: reqwest::Client,
    endpoints: EndpointConfig,
    metadata_timeout: Duration,
    logger: Arc<dyn FetchLogger>,
}

impl ChecksumVerifier {
    pub fn new(
        client: reqwest::Client,
        endpoints: EndpointConfig,
        metadata_timeout: Duration,
        logger: Arc<dyn FetchLogger>,
    ) -> Self {
        Self {
            client,
            endpoints,
            metadata_timeout,
            logger,
        }
    }

    /// Fetches checksum metadata for a datafile.
    ///
    /// Transport, status and decoding failures are logged and reported as `None`.
    pub async fn fetch_file_metadata(&self, file_id: &str) -> Option<RemoteMetadata> {
        let url = self.endpoints.metadata_url_for(file_id);
        tracing::debug!(file_id, url = %url, "Fetching file metadata");

        let response = async {
            self.client
                .get(&url)
                .timeout(self.metadata_timeout)
                .send()
                .await?
                .error_for_status()?
                .json::<MetadataResponse>()
                .await
        }
        .await;

        match response {
            Ok(response) => response.into_metadata(),
            Err(e) => {
                self.logger.warning(&format!(
                    "Could not retrieve metadata for file {file_id}: {e}"
                ));
                None
            }
        }
    }

    pub async fn check_file_checksum(&self, file_path: &Path, file_id: &str) -> VerificationOutcome {
        if !file_path.exists() {
            self.logger.error(&format!(
                "File {} not found for checksum verification",
                file_path.display()
            ));
            return VerificationOutcome::MissingFile;
        }

        let metadata = self.fetch_file_metadata(file_id).await;
        let Some((checksum_type, expected)) = metadata.and_then(|metadata| {
            metadata
                .checksum_value
                .filter(|value| !value.is_empty())
                .map(|value| (metadata.checksum_type.unwrap_or_default(), value))
        }) else {
            self.logger.info(&format!(
                "Checksum not available for file {file_id}, skipping verification"
            ));
            return VerificationOutcome::Skipped {
                reason: "checksum not available".to_string(),
            };
        };

        let Some(algorithm) = ChecksumAlgorithm::from_dataverse_type(&checksum_type) else {
            let checksum_type = checksum_type.to_uppercase();
            self.logger.info(&format!(
                "Unsupported checksum type '{checksum_type}' for file {file_id}, skipping verification"
            ));
            return VerificationOutcome::Skipped {
                reason: format!("unsupported checksum type '{checksum_type}'"),
            };
        };

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());

        let actual = match algorithm {
            ChecksumAlgorithm::Md5 => calculate_md5_checksum(file_path).await,
        };
        let actual = match actual {
            Ok(actual) => actual,
            Err(e) => {
                self.logger.error(&format!(
                    "Failed to verify checksum for {}: {:#}",
                    file_path.display(),
                    e
                ));
                return VerificationOutcome::Unreadable {
                    reason: format!("{e:#}"),
                };
            }
        };

        match verify_hex_digest(&expected, &actual) {
            Ok(()) => {
                self.logger
                    .info(&format!("✓ Checksum verified for {file_name}"));
                VerificationOutcome::Verified
            }
            Err(VerificationError::VerificationFailed { expected, actual }) => {
                self.logger
                    .error(&format!("✗ Checksum mismatch for {file_name}"));
                self.logger.error(&format!("  Expected: {expected}"));
                self.logger.error(&format!("  Got:      {actual}"));
                VerificationOutcome::Mismatch { expected, actual }
            }
        }
    }

    /// Returns `true` when the checksum matches or cannot be checked remotely.
    pub async fn verify_file_checksum(&self, file_path: &Path, file_id: &str) -> bool {
        self.check_file_checksum(file_path, file_id).await.passed()
    }
}
