//! Best-effort host metadata collection

use std::sync::Arc;

use chrono::Utc;
use pkgsnap_exec::traits::CommandExecutor;
use tracing::{debug, instrument, warn};

use crate::types::{SystemMetadata, UNKNOWN};

/// Collects host identity facts
///
/// Every fact is an independent fallible probe; a probe that fails leaves
/// the "unknown" sentinel in place instead of failing the run. Metadata is
/// context, not load-bearing data.
pub struct MetadataCollector {
    executor: Arc<dyn CommandExecutor>,
}

impl MetadataCollector {
    /// Create a new metadata collector
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Collect all host facts, stamping the collection time
    #[instrument(skip(self))]
    pub async fn collect(&self) -> SystemMetadata {
        debug!("collecting host metadata");

        let hostname = self.probe("hostname").await;

        let (os_name, os_version) = match self.probe_raw("cat /etc/os-release").await {
            Some(contents) => parse_os_release(&contents),
            None => (None, None),
        };

        let kernel_version = self.probe("uname -r").await;

        SystemMetadata {
            hostname: hostname.unwrap_or_else(unknown),
            os_name: os_name.unwrap_or_else(unknown),
            os_version: os_version.unwrap_or_else(unknown),
            kernel_version: kernel_version.unwrap_or_else(unknown),
            collector_version: env!("CARGO_PKG_VERSION").to_string(),
            runtime_version: runtime_version(),
            collection_timestamp: Utc::now(),
        }
    }

    /// Run a probe and return its trimmed first line
    async fn probe(&self, cmd: &str) -> Option<String> {
        self.probe_raw(cmd)
            .await
            .and_then(|out| out.lines().next().map(|l| l.trim().to_string()))
            .filter(|s| !s.is_empty())
    }

    /// Run a probe and return its full stdout
    async fn probe_raw(&self, cmd: &str) -> Option<String> {
        match self.executor.run(cmd).await {
            Ok(result) if result.success() => Some(result.stdout),
            Ok(result) => {
                warn!(command = %cmd, status = result.status, "metadata probe failed");
                None
            }
            Err(e) => {
                warn!(command = %cmd, error = %e, "metadata probe failed");
                None
            }
        }
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Toolchain version recorded at build time
///
/// Cargo sets `CARGO_PKG_RUST_VERSION` to the empty string when the
/// manifest carries no `rust-version`, so empty degrades to the sentinel.
fn runtime_version() -> String {
    match option_env!("CARGO_PKG_RUST_VERSION") {
        Some(v) if !v.is_empty() => format!("rust {v}"),
        _ => unknown(),
    }
}

/// Extract NAME and VERSION_ID from /etc/os-release contents
fn parse_os_release(contents: &str) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut version = None;

    for line in contents.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"');
        if value.is_empty() {
            continue;
        }

        match key.trim() {
            "NAME" => name = Some(value.to_string()),
            "VERSION_ID" => version = Some(value.to_string()),
            _ => {}
        }
    }

    (name, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_release() {
        let contents = r#"PRETTY_NAME="Debian GNU/Linux 12 (bookworm)"
NAME="Debian GNU/Linux"
VERSION_ID="12"
VERSION="12 (bookworm)"
ID=debian
"#;

        let (name, version) = parse_os_release(contents);

        assert_eq!(name.as_deref(), Some("Debian GNU/Linux"));
        assert_eq!(version.as_deref(), Some("12"));
    }

    #[test]
    fn test_parse_os_release_unquoted() {
        let contents = "NAME=Fedora\nVERSION_ID=39\n";

        let (name, version) = parse_os_release(contents);

        assert_eq!(name.as_deref(), Some("Fedora"));
        assert_eq!(version.as_deref(), Some("39"));
    }

    #[test]
    fn test_parse_os_release_missing_fields() {
        let (name, version) = parse_os_release("ID=arch\n");

        assert!(name.is_none());
        assert!(version.is_none());
    }

    #[test]
    fn test_runtime_version_is_well_formed() {
        // Either the sentinel or "rust <version>", never a bare "rust "
        let version = runtime_version();
        assert!(
            version == UNKNOWN
                || version
                    .strip_prefix("rust ")
                    .is_some_and(|v| !v.trim().is_empty()),
            "malformed runtime_version: {version:?}"
        );
    }
}
