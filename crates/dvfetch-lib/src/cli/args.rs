use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone)]
pub enum Command {
    Fetch {
        config_path: Option<String>,
        input_path: String,
        separator: char,
        output_dir: Option<String>,
        verify_checksum: bool,
        quiet: bool,
    },
    Verify {
        config_path: Option<String>,
        file_path: String,
        file_id: String,
    },
    Resolve {
        config_path: Option<String>,
        file_id: String,
        name: String,
        file_type: String,
        output_dir: Option<String>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "dvfetch",
    version,
    author = "Nick Guletskii",
    about = "Download the Dataverse datafiles listed in a table, skipping files that are already present"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file overriding endpoints and download settings",
        global = true
    )]
    config: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Download every datafile listed in a delimited table
    Fetch {
        #[arg(
            short = 'i',
            long = "input",
            value_name = "FILE",
            help = "Delimited file with 'id', 'name' and 'type' columns"
        )]
        input: String,

        #[arg(
            short = 's',
            long = "sep",
            value_name = "CHAR",
            help = "Column separator of the input file",
            default_value_t = ','
        )]
        separator: char,

        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Directory to save datafiles into (default: <config.output.path> or the current directory)"
        )]
        output_dir: Option<String>,

        #[arg(
            long = "verify-checksum",
            help = "Verify MD5 checksums of downloaded and existing files",
            action = ArgAction::SetTrue
        )]
        verify_checksum: bool,

        #[arg(
            short = 'q',
            long = "quiet",
            help = "Hide progress bars and download logging",
            action = ArgAction::SetTrue
        )]
        quiet: bool,
    },

    /// Verify a local file against the checksum Dataverse reports for it
    Verify {
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file: String,

        #[arg(long = "id", value_name = "ID", help = "Dataverse file identifier")]
        id: String,
    },

    /// Print the download URL and local filename of a datafile without downloading it
    Resolve {
        #[arg(long = "id", value_name = "ID", help = "Dataverse file identifier")]
        id: String,

        #[arg(long = "name", value_name = "NAME")]
        name: String,

        #[arg(long = "type", value_name = "EXT")]
        file_type: String,

        #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
        output_dir: Option<String>,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    if let Ok(directive) = "hyper_util=warn".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(env_filter)
        .init();

    let command = into_command(cli.command, cli.config);

    Args { command, log_level }
}

fn into_command(command: CliCommand, config_path: Option<String>) -> Command {
    match command {
        CliCommand::Fetch {
            input,
            separator,
            output_dir,
            verify_checksum,
            quiet,
        } => Command::Fetch {
            config_path,
            input_path: input,
            separator,
            output_dir,
            verify_checksum,
            quiet,
        },
        CliCommand::Verify { file, id } => Command::Verify {
            config_path,
            file_path: file,
            file_id: id,
        },
        CliCommand::Resolve {
            id,
            name,
            file_type,
            output_dir,
        } => Command::Resolve {
            config_path,
            file_id: id,
            name,
            file_type,
            output_dir,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        let cli = Cli::try_parse_from(args).unwrap();
        into_command(cli.command, cli.config)
    }

    #[test]
    fn test_fetch_defaults() {
        match parse(&["dvfetch", "fetch", "--input", "files.csv"]) {
            Command::Fetch {
                config_path,
                input_path,
                separator,
                output_dir,
                verify_checksum,
                quiet,
            } => {
                assert_eq!(config_path, None);
                assert_eq!(input_path, "files.csv");
                assert_eq!(separator, ',');
                assert_eq!(output_dir, None);
                assert!(!verify_checksum);
                assert!(!quiet);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_fetch_with_tab_separator_and_global_config() {
        match parse(&[
            "dvfetch",
            "fetch",
            "-i",
            "files.tsv",
            "--sep",
            "\t",
            "-o",
            "data",
            "--verify-checksum",
            "-q",
            "-c",
            "dvfetch.yaml",
        ]) {
            Command::Fetch {
                config_path,
                separator,
                output_dir,
                verify_checksum,
                quiet,
                ..
            } => {
                assert_eq!(config_path.as_deref(), Some("dvfetch.yaml"));
                assert_eq!(separator, '\t');
                assert_eq!(output_dir.as_deref(), Some("data"));
                assert!(verify_checksum);
                assert!(quiet);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_resolve_arguments() {
        match parse(&[
            "dvfetch", "resolve", "--id", "6180617", "--name", "test_nodes", "--type", "tab",
        ]) {
            Command::Resolve {
                file_id,
                name,
                file_type,
                ..
            } => {
                assert_eq!(file_id, "6180617");
                assert_eq!(name, "test_nodes");
                assert_eq!(file_type, "tab");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_multi_character_separator_is_rejected() {
        assert!(Cli::try_parse_from(["dvfetch", "fetch", "-i", "f.csv", "--sep", ";;"]).is_err());
    }
}
