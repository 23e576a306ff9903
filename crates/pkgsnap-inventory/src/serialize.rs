//! Report serialization and output

use std::io::Write;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::{debug, info, instrument};

use crate::error::InventoryError;
use crate::types::Report;

/// Output rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Single JSON document
    Json,
    /// Human-readable text summary
    Text,
}

impl ReportFormat {
    /// File extension for this format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }
}

/// Where the rendered report goes
#[derive(Debug, Clone)]
pub enum Destination {
    /// Write to a file at this path
    File(PathBuf),
    /// Write to the inherited standard output (dry-run mode)
    Stdout,
}

/// Render a report to bytes
///
/// Format and compression are orthogonal; gzip wraps the rendered bytes
/// without altering the logical content.
///
/// # Errors
/// Returns an error if JSON encoding or gzip framing fails.
#[instrument(skip(report), fields(format = ?format, compress))]
pub fn render(
    report: &Report,
    format: ReportFormat,
    compress: bool,
) -> Result<Vec<u8>, InventoryError> {
    let rendered = match format {
        ReportFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(report)
                .map_err(|e| InventoryError::Serialize(e.to_string()))?;
            bytes.push(b'\n');
            bytes
        }
        ReportFormat::Text => render_text(report).into_bytes(),
    };

    if !compress {
        return Ok(rendered);
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&rendered)
        .map_err(|e| InventoryError::Serialize(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| InventoryError::Serialize(e.to_string()))
}

/// Write rendered bytes to the destination
///
/// Rendering happens before this call, so a failed render never leaves a
/// partially written file behind.
///
/// # Errors
/// Returns an error if the file or stdout write fails.
pub fn write_report(bytes: &[u8], destination: &Destination) -> Result<(), InventoryError> {
    match destination {
        Destination::File(path) => {
            debug!(path = %path.display(), "writing report file");
            std::fs::write(path, bytes).map_err(|e| InventoryError::Io(e.to_string()))?;
            info!(path = %path.display(), size = bytes.len(), "report written");
        }
        Destination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .map_err(|e| InventoryError::Io(e.to_string()))?;
            stdout
                .flush()
                .map_err(|e| InventoryError::Io(e.to_string()))?;
        }
    }
    Ok(())
}

/// Deterministic plain-text rendering: metadata header block, blank line,
/// one entry per package in enumeration order
fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let meta = &report.metadata;

    out.push_str(&format!("hostname: {}\n", meta.hostname));
    out.push_str(&format!("os_name: {}\n", meta.os_name));
    out.push_str(&format!("os_version: {}\n", meta.os_version));
    out.push_str(&format!("kernel_version: {}\n", meta.kernel_version));
    out.push_str(&format!("collector_version: {}\n", meta.collector_version));
    out.push_str(&format!("runtime_version: {}\n", meta.runtime_version));
    out.push_str(&format!(
        "collection_timestamp: {}\n",
        meta.collection_timestamp.to_rfc3339()
    ));
    out.push_str(&format!("package_manager: {}\n", report.package_manager));
    out.push_str(&format!("packages: {}\n", report.packages.len()));
    out.push('\n');

    for package in &report.packages {
        out.push_str(&format!("{} {}\n", package.name, package.version));
        if let Some(description) = &package.description {
            out.push_str(&format!("  {description}\n"));
        }
        if let Some(dependencies) = &package.dependencies {
            out.push_str(&format!("  depends: {}\n", dependencies.join(", ")));
        }
    }

    out
}
