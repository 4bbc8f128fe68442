use super::progress::create_download_progress;
use super::types::{DownloadStatus, FetchOptions, FetchSummary, RecordOutcome, ResolvedRecord};
use crate::config::EndpointConfig;
use crate::error::DvFetchError;
use crate::logger::{FetchLogger, SilentLogger, TracingLogger};
use crate::table::{DatasetRecord, TableSource};
use crate::verification::{ChecksumVerifier, VerificationOutcome};
use reqwest::header::CONTENT_LENGTH;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Downloads Dataverse datafiles one at a time.
#[derive(Clone)]
pub struct DataverseFetcher {
    client: reqwest::Client,
    endpoints: EndpointConfig,
    options: FetchOptions,
    logger: Arc<dyn FetchLogger>,
    verifier: ChecksumVerifier,
}

impl DataverseFetcher {
    /// Builds a fetcher that logs through `tracing` when `options.verbose` is set.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or `block_size` is zero.
    pub fn new(endpoints: EndpointConfig, options: FetchOptions) -> Result<Self, DvFetchError> {
        if options.block_size == 0 {
            return Err(DvFetchError::InvalidInput {
                reason: "block size must be greater than 0".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| DvFetchError::InvalidInput {
            reason: format!("Failed to build HTTP client: {e}"),
        })?;

        let logger: Arc<dyn FetchLogger> = if options.verbose {
            Arc::new(TracingLogger)
        } else {
            Arc::new(SilentLogger)
        };
        let verifier = ChecksumVerifier::new(
            client.clone(),
            endpoints.clone(),
            options.metadata_timeout,
            logger.clone(),
        );

        Ok(Self {
            client,
            endpoints,
            options,
            logger,
            verifier,
        })
    }

    pub fn with_logger(mut self, logger: Arc<dyn FetchLogger>) -> Self {
        self.verifier = ChecksumVerifier::new(
            self.client.clone(),
            self.endpoints.clone(),
            self.options.metadata_timeout,
            logger.clone(),
        );
        self.logger = logger;
        self
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    pub fn verifier(&self) -> &ChecksumVerifier {
        &self.verifier
    }

    /// Computes the remote URL and local target of a record without touching the network.
    pub fn resolve(
        &self,
        record: &DatasetRecord,
        output_dir: &Path,
    ) -> Result<ResolvedRecord, DvFetchError> {
        record.validate()?;

        let filename = record.filename();
        Ok(ResolvedRecord {
            url: self.endpoints.download_url_for(&record.id),
            path: output_dir.join(&filename),
            filename,
        })
    }

    /// Streams `url` into `save_path`, returning the number of bytes written.
    ///
    /// The body goes to a `.part` sibling first and is renamed into place once
    /// fully flushed.
    pub async fn download_file(&self, url: &str, save_path: &Path) -> Result<u64, DvFetchError> {
        let download_failed = |reason: String| DvFetchError::DownloadFailed {
            url: url.to_string(),
            reason,
        };
        let write_failed = |path: &Path, e: std::io::Error| DvFetchError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| download_failed(e.to_string()))?;

        let total_size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(0);

        let file_name = save_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let progress = create_download_progress(total_size, &file_name, self.options.verbose);
        tracing::debug!(url, total_size, output = %save_path.display(), "Downloading");

        let part_path = partial_path(save_path);
        let file = tokio::fs::File::create(&part_path)
            .await
            .map_err(|e| write_failed(&part_path, e))?;
        let mut writer = BufWriter::new(file);

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| download_failed(e.to_string()))?
        {
            for block in chunk.chunks(self.options.block_size) {
                writer
                    .write_all(block)
                    .await
                    .map_err(|e| write_failed(&part_path, e))?;
                written += block.len() as u64;
                progress.inc(block.len() as u64);
            }
        }

        writer
            .flush()
            .await
            .map_err(|e| write_failed(&part_path, e))?;
        drop(writer);
        progress.finish_and_clear();

        tokio::fs::rename(&part_path, save_path)
            .await
            .map_err(|e| write_failed(save_path, e))?;

        tracing::debug!(url, written, output = %save_path.display(), "Downloaded");
        Ok(written)
    }

    /// Downloads one record unless its target file already exists.
    ///
    /// A checksum mismatch is logged and reported in the outcome, never raised.
    pub async fn download_record(
        &self,
        record: &DatasetRecord,
        output_dir: &Path,
    ) -> Result<RecordOutcome, DvFetchError> {
        let resolved = self.resolve(record, output_dir)?;

        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| DvFetchError::DirectoryCreateFailed {
                path: output_dir.to_path_buf(),
                reason: e.to_string(),
            })?;

        let status = if resolved.path.exists() {
            self.logger.info(&format!(
                "Found local copy for {} datafile as {}",
                record.id, resolved.filename
            ));
            DownloadStatus::AlreadyPresent
        } else {
            self.logger.info(&format!(
                "Downloading {} datafile as {}",
                record.id, resolved.filename
            ));
            self.download_file(&resolved.url, &resolved.path).await?;
            DownloadStatus::Downloaded
        };

        let verification = if self.options.verify_checksum {
            let outcome = self
                .verifier
                .check_file_checksum(&resolved.path, &record.id)
                .await;
            if !outcome.passed() {
                self.logger.warning(&format!(
                    "Checksum verification failed for {}",
                    resolved.filename
                ));
            }
            Some(outcome)
        } else {
            None
        };

        Ok(RecordOutcome {
            resolved,
            status,
            verification,
        })
    }

    /// Fetches every record of `source` into `output_dir`, stopping at the first failure.
    ///
    /// Files written before a failure stay on disk.
    pub async fn fetch_all(
        &self,
        source: impl Into<TableSource>,
        output_dir: impl AsRef<Path>,
    ) -> Result<FetchSummary, DvFetchError> {
        let output_dir = output_dir.as_ref();
        let records = source.into().load()?;

        self.logger.info(&format!(
            "Searching for {} datafiles in dataverse",
            records.len()
        ));
        if self.options.verify_checksum {
            self.logger.info("Checksum verification enabled");
        }

        let mut summary = FetchSummary::default();
        for record in &records {
            match self.download_record(record, output_dir).await {
                Ok(outcome) => summary.outcomes.push(outcome),
                Err(e) => {
                    self.logger
                        .error(&format!("Failed to download entry {}: {}", record.id, e));
                    return Err(e);
                }
            }
        }

        self.logger.info(&format!(
            "Download completed, saved to `{}`",
            output_dir.display()
        ));
        Ok(summary)
    }

    /// Verifies an existing local file against the remote checksum of `file_id`.
    pub async fn verify_file_checksum(&self, file_path: &Path, file_id: &str) -> bool {
        self.verifier.verify_file_checksum(file_path, file_id).await
    }

    pub async fn check_file_checksum(
        &self,
        file_path: &Path,
        file_id: &str,
    ) -> VerificationOutcome {
        self.verifier.check_file_checksum(file_path, file_id).await
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".part");
    path.with_file_name(file_name)
}
