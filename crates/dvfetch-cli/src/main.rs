use dvfetch_lib::cli::{
    ResolvedCommand, parse_args, resolve_command, run_fetch, run_resolve, run_verify,
};
use dvfetch_lib::error::DvFetchError;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, DvFetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Fetch(params) => {
            run_fetch(params).await?;
        }
        ResolvedCommand::Verify(params) => {
            let file_path = params.file_path.clone();
            let outcome = run_verify(params).await?;
            println!("{}: {:?}", file_path.display(), outcome);
            if !outcome.passed() {
                return Ok(ExitCode::FAILURE);
            }
        }
        ResolvedCommand::Resolve(params) => {
            let resolved = run_resolve(params)?;
            println!("url\t{}", resolved.url);
            println!("filename\t{}", resolved.filename);
            println!("path\t{}", resolved.path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
