use digest::Digest;
use eyre::{Result, WrapErr};
use md5::Md5;
use std::path::Path;
use thiserror::Error;
use tokio::io::AsyncReadExt;

const CHECKSUM_CHUNK_SIZE: usize = 4096;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification failed: expected {expected}, got {actual}")]
    VerificationFailed { expected: String, actual: String },
}

/// Checksum algorithms that can be verified locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Md5,
}

impl ChecksumAlgorithm {
    /// Parses the checksum `type` reported by the Dataverse API.
    pub fn from_dataverse_type(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("MD5") {
            Some(Self::Md5)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
        }
    }
}

/// Streams the file through MD5 and returns the lowercase hex digest.
pub async fn calculate_md5_checksum(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .wrap_err_with(|| format!("Failed to calculate checksum for {}", path.display()))?;

    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; CHECKSUM_CHUNK_SIZE];
    loop {
        let bytes_read = file
            .read(&mut buffer)
            .await
            .wrap_err_with(|| format!("Failed to read from {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        Digest::update(&mut hasher, &buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compares hex digests ignoring case.
pub fn verify_hex_digest(expected: &str, actual: &str) -> Result<(), VerificationError> {
    if expected.trim().eq_ignore_ascii_case(actual.trim()) {
        Ok(())
    } else {
        Err(VerificationError::VerificationFailed {
            expected: expected.to_ascii_lowercase(),
            actual: actual.to_ascii_lowercase(),
        })
    }
}
