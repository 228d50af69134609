#![deny(missing_docs)]

//! # STT CLI
//!
//! Command line front end for the Swagger test template generator.
//!
//! Supported Commands:
//! - `generate`: Compiles a Swagger 2.0 document into mocha test files.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod generate;

const DEFAULT_LOG_FILTER: &str = "stt=info,stt_core=info";

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger test template generator")]
struct Cli {
    /// Log filter directive (overrides RUST_LOG).
    #[clap(long, global = true)]
    log_level: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates API test files from a Swagger 2.0 document.
    Generate(generate::GenerateArgs),
}

fn init_tracing(directive: Option<&str>) {
    let filter = match directive {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match &cli.command {
        Commands::Generate(args) => {
            generate::execute(args)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "stt",
            "generate",
            "--input",
            "api.yaml",
            "--output",
            "out",
            "--path",
            "/pets",
            "--path",
            "/owners",
            "--max-len",
            "-1",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command;
        assert_eq!(args.path, vec!["/pets", "/owners"]);
        assert_eq!(args.max_len, Some(-1));
        assert!(args.test_module.is_none());
    }
}
