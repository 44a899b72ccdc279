//! Binary crate for the `nyt` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and resolving credentials
//! - Interactive configuration
//! - Human-friendly or JSON output formatting
//! - Mapping failures to process exit codes

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod exit;
mod output;

/// `RUST_LOG` wins; otherwise `--verbose` turns on debug logs for this tool.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "nyt=debug,nyt_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);

    let code = match cmd.run().await {
        Ok(()) => exit::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit::code_for(&e)
        }
    };

    std::process::exit(code);
}
