use crate::cli::args::Command;
use crate::cli::params::{FetchParams, ResolveParams, VerifyParams};
use crate::config::{Config, EndpointConfig, load_config};
use crate::download::FetchOptions;
use crate::error::DvFetchError;
use crate::table::{DatasetRecord, TableSource};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Fetch(FetchParams),
    Verify(VerifyParams),
    Resolve(ResolveParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, DvFetchError> {
    match command {
        Command::Fetch {
            config_path,
            input_path,
            separator,
            output_dir,
            verify_checksum,
            quiet,
        } => {
            let app_config = load_validated_config(config_path.as_deref())?;

            let mut options = FetchOptions::from(&app_config.download);
            options.verify_checksum |= verify_checksum;
            options.verbose = !quiet;

            Ok(ResolvedCommand::Fetch(FetchParams {
                source: TableSource::path(input_path, separator),
                output_dir: resolve_output_dir(output_dir, &app_config),
                endpoints: app_config.endpoints,
                options,
            }))
        }
        Command::Verify {
            config_path,
            file_path,
            file_id,
        } => {
            let app_config = load_validated_config(config_path.as_deref())?;

            if file_id.is_empty() {
                return Err(DvFetchError::CliArgumentValidation {
                    details: "File identifier must not be empty.".to_string(),
                });
            }

            Ok(ResolvedCommand::Verify(VerifyParams {
                options: FetchOptions {
                    verify_checksum: true,
                    ..FetchOptions::from(&app_config.download)
                },
                endpoints: app_config.endpoints,
                file_path: PathBuf::from(file_path),
                file_id,
            }))
        }
        Command::Resolve {
            config_path,
            file_id,
            name,
            file_type,
            output_dir,
        } => {
            let app_config = load_validated_config(config_path.as_deref())?;

            let record = DatasetRecord::new(file_id, name, file_type);
            record.validate()?;

            Ok(ResolvedCommand::Resolve(ResolveParams {
                output_dir: resolve_output_dir(output_dir, &app_config),
                endpoints: app_config.endpoints,
                record,
            }))
        }
    }
}

fn resolve_output_dir(output_dir: Option<String>, app_config: &Config) -> PathBuf {
    output_dir
        .map(PathBuf::from)
        .or_else(|| app_config.output.path.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_validated_config(config_path: Option<&str>) -> Result<Config, DvFetchError> {
    let app_config = load_config(config_path)?;
    validate_endpoints(&app_config.endpoints)?;

    if app_config.download.block_size == 0 {
        return Err(DvFetchError::CliArgumentValidation {
            details: "download.block_size must be greater than 0.".to_string(),
        });
    }

    Ok(app_config)
}

fn validate_endpoints(endpoints: &EndpointConfig) -> Result<(), DvFetchError> {
    for (name, value) in [
        ("endpoints.download_url", endpoints.download_url.as_str()),
        (
            "endpoints.metadata_url",
            endpoints.metadata_url.as_str(),
        ),
    ] {
        url::Url::parse(value).map_err(|e| DvFetchError::CliArgumentValidation {
            details: format!("{name} is not a valid URL ({value}): {e}"),
        })?;
    }

    if !endpoints.metadata_url.contains("{id}") {
        return Err(DvFetchError::CliArgumentValidation {
            details: "endpoints.metadata_url must contain an {id} placeholder.".to_string(),
        });
    }

    Ok(())
}
