//! pkgsnap
//!
//! Takes a point-in-time snapshot of a Linux host: detects the governing
//! package manager, enumerates installed packages, gathers host metadata
//! and writes the combined report to a file or stdout.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use clap::Parser;
use color_eyre::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pkgsnap_exec::local::LocalExecutor;
use pkgsnap_exec::traits::CommandExecutor;
use pkgsnap_inventory::collector::MetadataCollector;
use pkgsnap_inventory::report::assemble_report;
use pkgsnap_inventory::serialize::{Destination, ReportFormat, render, write_report};
use pkgsnap_pkg::detect::{backend_for, detect_manager};

#[derive(Parser)]
#[command(name = "pkgsnap")]
#[command(about = "Snapshot installed packages and host metadata", version)]
struct Cli {
    /// Output file path; defaults to packages_<timestamp> with a matching
    /// extension
    output: Option<PathBuf>,

    /// Serialize the report as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// gzip-compress the output
    #[arg(long)]
    gzip: bool,

    /// Fetch per-package description and dependencies
    #[arg(long)]
    detailed: bool,

    /// Print the report to stdout without writing any file
    #[arg(long)]
    test: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Timestamp-derived default filename, e.g. `packages_2024-05-01_12-30-00.json.gz`
fn default_filename(format: ReportFormat, compress: bool, now: DateTime<Local>) -> PathBuf {
    let timestamp = now.format("%Y-%m-%d_%H-%M-%S");
    let mut name = format!("packages_{timestamp}.{}", format.extension());
    if compress {
        name.push_str(".gz");
    }
    PathBuf::from(name)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for --test output
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let executor: Arc<dyn CommandExecutor> = Arc::new(LocalExecutor::new());

    let kind = detect_manager(executor.as_ref()).await?;
    debug!(manager = %kind, "detected package manager");

    let backend = backend_for(kind, Arc::clone(&executor));
    let packages = backend.enumerate(cli.detailed).await?;

    let metadata = MetadataCollector::new(Arc::clone(&executor)).collect().await;

    let report = assemble_report(kind, packages, metadata, cli.detailed)?;

    let format = if cli.json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };
    let bytes = render(&report, format, cli.gzip)?;

    let destination = if cli.test {
        Destination::Stdout
    } else {
        let path = cli
            .output
            .unwrap_or_else(|| default_filename(format, cli.gzip, Local::now()));
        Destination::File(path)
    };

    write_report(&bytes, &destination)?;

    if let Destination::File(path) = &destination {
        println!("Saved package report to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_filename() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        assert_eq!(
            default_filename(ReportFormat::Json, false, now),
            PathBuf::from("packages_2024-05-01_12-30-00.json")
        );
        assert_eq!(
            default_filename(ReportFormat::Text, false, now),
            PathBuf::from("packages_2024-05-01_12-30-00.txt")
        );
        assert_eq!(
            default_filename(ReportFormat::Text, true, now),
            PathBuf::from("packages_2024-05-01_12-30-00.txt.gz")
        );
    }
}
