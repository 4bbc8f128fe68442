use crate::cli::VerifyParams;
use crate::download::DataverseFetcher;
use crate::error::DvFetchError;
use crate::verification::VerificationOutcome;

pub async fn run_verify(params: VerifyParams) -> Result<VerificationOutcome, DvFetchError> {
    let VerifyParams {
        endpoints,
        file_path,
        file_id,
        options,
    } = params;

    tracing::info!("Verifying {} against file {}", file_path.display(), file_id);

    let fetcher = DataverseFetcher::new(endpoints, options)?;
    Ok(fetcher.check_file_checksum(&file_path, &file_id).await)
}
