use crate::cli::ResolveParams;
use crate::download::{DataverseFetcher, FetchOptions, ResolvedRecord};
use crate::error::DvFetchError;

pub fn run_resolve(params: ResolveParams) -> Result<ResolvedRecord, DvFetchError> {
    let ResolveParams {
        endpoints,
        record,
        output_dir,
    } = params;

    let fetcher = DataverseFetcher::new(endpoints, FetchOptions::default())?;
    fetcher.resolve(&record, &output_dir)
}
