use crate::cli::FetchParams;
use crate::download::DataverseFetcher;
use crate::download::FetchSummary;
use crate::error::DvFetchError;
use tracing;

pub async fn run_fetch(params: FetchParams) -> Result<FetchSummary, DvFetchError> {
    let FetchParams {
        endpoints,
        source,
        output_dir,
        options,
    } = params;

    let fetcher = DataverseFetcher::new(endpoints, options)?;
    let summary = fetcher.fetch_all(source, &output_dir).await?;

    tracing::debug!(
        downloaded = summary.downloaded(),
        already_present = summary.already_present(),
        "Fetch finished"
    );
    for outcome in summary.failed_verification() {
        tracing::warn!(
            "{} did not pass checksum verification",
            outcome.path().display()
        );
    }

    Ok(summary)
}
