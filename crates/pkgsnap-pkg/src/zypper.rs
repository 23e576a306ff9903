//! Zypper backend (openSUSE/SLES)

use std::sync::Arc;

use async_trait::async_trait;
use pkgsnap_exec::traits::CommandExecutor;
use tracing::{debug, info, instrument, warn};

use crate::error::PackageError;
use crate::runner::{finish_listing, run_query};
use crate::traits::PackageBackend;
use crate::types::{ManagerKind, Package};

/// Zypper backend
///
/// `zypper packages --installed-only` prints pipe-separated table rows,
/// which is the closest zypper has to a machine-readable listing.
pub struct ZypperBackend {
    executor: Arc<dyn CommandExecutor>,
}

impl ZypperBackend {
    /// Create a new Zypper backend
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Parse the pipe-separated package table
    ///
    /// Row layout: `S | Repository | Name | Version | Arch`. Header and
    /// separator rows are not counted as candidate entries.
    fn parse_listing(output: &str) -> Result<Vec<Package>, PackageError> {
        let mut packages = Vec::new();
        let mut skipped = 0usize;

        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('-') || !line.contains('|') {
                continue;
            }

            let cols: Vec<&str> = line.split('|').map(str::trim).collect();

            // Header row
            if cols.get(2) == Some(&"Name") {
                continue;
            }

            match (cols.get(2), cols.get(3)) {
                (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
                    packages.push(Package::new(*name, *version));
                }
                _ => {
                    warn!(line = %line, "skipping malformed zypper row");
                    skipped += 1;
                }
            }
        }

        // Output with content but no table at all is unparsable, except the
        // informational empty-install message
        if packages.is_empty() && skipped == 0 {
            let has_table = output.lines().any(|l| l.contains('|'));
            let empty_install =
                output.trim().is_empty() || output.contains("No packages found");
            if !has_table && !empty_install {
                return Err(PackageError::ParseError(
                    "no package table in zypper output".to_string(),
                ));
            }
        }

        finish_listing(packages, skipped, "zypper")
    }

    /// Parse `zypper info --requires` output: `Summary :` field plus the
    /// indented requirement list following the `Requires` header
    fn parse_info(output: &str) -> (Option<String>, Option<Vec<String>>) {
        let mut description = None;
        let mut dependencies: Option<Vec<String>> = None;
        let mut in_requires = false;

        for line in output.lines() {
            if let Some(stripped) = line.strip_prefix("Summary") {
                if let Some((_, value)) = stripped.split_once(':') {
                    description = Some(value.trim().to_string());
                }
                in_requires = false;
            } else if line.starts_with("Requires") {
                dependencies = Some(Vec::new());
                in_requires = true;
            } else if in_requires && line.starts_with(char::is_whitespace) {
                let dep = line.trim();
                if !dep.is_empty() {
                    if let Some(deps) = dependencies.as_mut() {
                        deps.push(dep.to_string());
                    }
                }
            } else {
                in_requires = false;
            }
        }

        (description, dependencies)
    }
}

#[async_trait]
impl PackageBackend for ZypperBackend {
    #[instrument(skip(self))]
    async fn list_packages(&self) -> Result<Vec<Package>, PackageError> {
        debug!("listing installed packages via zypper");

        let result = run_query(
            self.executor.as_ref(),
            "zypper --quiet --non-interactive packages --installed-only",
        )
        .await?;

        let packages = Self::parse_listing(&result.stdout)?;
        info!(count = packages.len(), "listed installed packages");

        Ok(packages)
    }

    async fn detail(&self, package: &Package) -> Result<Package, PackageError> {
        let cmd = format!(
            "zypper --quiet --non-interactive info --requires {}",
            package.name
        );
        let result = run_query(self.executor.as_ref(), &cmd).await?;

        let (description, dependencies) = Self::parse_info(&result.stdout);

        Ok(package
            .clone()
            .with_description(description.unwrap_or_default())
            .with_dependencies(dependencies.unwrap_or_default()))
    }

    fn kind(&self) -> ManagerKind {
        ManagerKind::Zypper
    }
}
