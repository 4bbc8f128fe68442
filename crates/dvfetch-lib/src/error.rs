use itertools::Itertools;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DvFetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error(
        "Input table missing required columns: [{}]. Required columns are: [id, name, type]",
        .missing.iter().join(", ")
    )]
    MissingColumns { missing: Vec<String> },

    #[error("Invalid record: {details}")]
    InvalidRecord { details: String },

    #[error("Input table is empty")]
    EmptyInput,

    #[error("File {path} not found")]
    FileNotFound { path: PathBuf },

    #[error("Failed to create directory {path}: {reason}")]
    DirectoryCreateFailed { path: PathBuf, reason: String },

    #[error("Failed to download file from {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to save file to {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Invalid command line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
