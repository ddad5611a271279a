//! btsnoop CLI entry point.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use btsnoop::cli::{Args, Exporter, OutputFormatter};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let store = btsnoop::decode_path(&args.file)
        .with_context(|| format!("Failed to decode capture: {}", args.file.display()))?;

    if !args.quiet {
        let formatter = OutputFormatter::new(args.format);
        let mut stdout = io::stdout().lock();
        formatter.write(&store, &mut stdout)?;
    }

    if let Some(report_path) = args.report_path() {
        Exporter::export(&report_path, args.format, &store)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        eprintln!("Report saved to: {}", report_path.display());
    }

    Ok(())
}
