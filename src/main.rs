//!
//! forkpull binary
//! ---------------
//! Pulls one collection from a Postman workspace, chosen by fork label with a
//! fallback to the staging fork, and writes it verbatim to a local file.

use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use forkpull::cli::{parse_args, print_usage, CliCommand};
use forkpull::config::Config;
use forkpull::error::AppError;
use forkpull::pull::pull;

fn main() -> Result<()> {
    // Logs go to stderr; stdout only carries the result line
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid RUST_LOG filter")?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut args: Vec<String> = env::args().collect();
    let program = if args.is_empty() { "forkpull".to_string() } else { args.remove(0) };

    let cli_args = match parse_args(&args) {
        Ok(CliCommand::Pull(a)) => a,
        Ok(CliCommand::Help) => {
            print_usage(&program);
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage(&program);
            std::process::exit(2);
        }
    };

    let config = match Config::from_sources(&cli_args, |name| env::var(name).ok()) {
        Ok(c) => c,
        Err(e) => exit_with(e),
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    match rt.block_on(pull(&config)) {
        Ok(report) => {
            println!("wrote {} bytes of collection {} to {}", report.bytes, report.uid(), report.destination.display());
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(err: AppError) -> ! {
    match &err {
        AppError::Validation { messages, .. } => {
            for m in messages { eprintln!("{}", m); }
        }
        other => eprintln!("{}: {}", other.code_str(), other.message()),
    }
    std::process::exit(err.exit_code());
}
