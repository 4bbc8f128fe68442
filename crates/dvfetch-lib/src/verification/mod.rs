pub mod checksum;
mod metadata;
mod verifier;

pub use checksum::{ChecksumAlgorithm, VerificationError, calculate_md5_checksum};
pub use metadata::{RemoteChecksum, RemoteMetadata};
pub use verifier::{ChecksumVerifier, VerificationOutcome};
