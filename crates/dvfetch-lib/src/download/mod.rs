mod download;
mod progress;
mod types;

pub use download::DataverseFetcher;
pub use progress::create_download_progress;
pub use types::{
    DownloadStatus, FetchOptions, FetchSummary, RecordOutcome, ResolvedRecord,
};
