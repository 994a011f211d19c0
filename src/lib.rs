pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod processor;
pub mod writer;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use error::{ConvertError, Result};

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    // 1. ── Configure ──────────────────────────────────────────────────
    let file_config = match &args.config {
        Some(path) => {
            config::load(path).with_context(|| format!("Loading {}", path.display()))?
        }
        None => config::Config::default(),
    };
    let options = file_config.into_options(&args);

    // 2. ── Convert ────────────────────────────────────────────────────
    if !args.recursive {
        convert::convert_file(&args.input, args.output.as_deref(), &options)
            .with_context(|| format!("Converting {}", args.input.display()))?;
        return Ok(());
    }

    let report = convert::convert_recursive(&args.input, args.output.as_deref(), &options);

    // 3. ── Report ─────────────────────────────────────────────────────
    info!(
        converted = report.converted.len(),
        missing = report.missing.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    if !report.is_success() {
        bail!(
            "{} of {} files failed to convert",
            report.failed.len(),
            report.failed.len() + report.converted.len()
        );
    }
    Ok(())
}

/// stderr logging; `RUST_LOG` beats `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
