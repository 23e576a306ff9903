//! YUM/RPM backend (Fedora/RHEL/CentOS)

use std::sync::Arc;

use async_trait::async_trait;
use pkgsnap_exec::traits::CommandExecutor;
use tracing::{debug, info, instrument, warn};

use crate::error::PackageError;
use crate::runner::{finish_listing, run_query};
use crate::traits::PackageBackend;
use crate::types::{ManagerKind, Package};

/// YUM/RPM backend
///
/// Queries the rpm database directly; `rpm -qa` with a query format is the
/// stable machine-readable interface on every yum/dnf host.
pub struct YumBackend {
    executor: Arc<dyn CommandExecutor>,
}

impl YumBackend {
    /// Create a new YUM backend
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Parse `rpm -qa --queryformat '%{NAME}\t%{VERSION}-%{RELEASE}\n'` output
    fn parse_listing(output: &str) -> Result<Vec<Package>, PackageError> {
        let mut packages = Vec::new();
        let mut skipped = 0usize;

        for line in output.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.splitn(2, '\t');
            match (fields.next(), fields.next()) {
                (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
                    packages.push(Package::new(name, version));
                }
                _ => {
                    warn!(line = %line, "skipping malformed rpm line");
                    skipped += 1;
                }
            }
        }

        finish_listing(packages, skipped, "rpm")
    }

    /// Parse per-package detail output: first line is the summary, the
    /// remaining lines are requirements
    fn parse_detail(output: &str) -> (Option<String>, Vec<String>) {
        let mut lines = output.lines();
        let description = lines.next().map(|l| l.trim().to_string());

        let mut dependencies = Vec::new();
        for line in lines {
            let dep = line.trim();
            // Internal rpmlib capabilities are packaging machinery, not
            // package dependencies
            if dep.is_empty() || dep.starts_with("rpmlib(") {
                continue;
            }
            if !dependencies.iter().any(|d| d == dep) {
                dependencies.push(dep.to_string());
            }
        }

        (description, dependencies)
    }
}

#[async_trait]
impl PackageBackend for YumBackend {
    #[instrument(skip(self))]
    async fn list_packages(&self) -> Result<Vec<Package>, PackageError> {
        debug!("listing installed packages via rpm");

        let result = run_query(
            self.executor.as_ref(),
            r"rpm -qa --queryformat '%{NAME}\t%{VERSION}-%{RELEASE}\n'",
        )
        .await?;

        let packages = Self::parse_listing(&result.stdout)?;
        info!(count = packages.len(), "listed installed packages");

        Ok(packages)
    }

    async fn detail(&self, package: &Package) -> Result<Package, PackageError> {
        let cmd = format!(
            r"rpm -q --queryformat '%{{SUMMARY}}\n[%{{REQUIRENAME}}\n]' {}",
            package.name
        );
        let result = run_query(self.executor.as_ref(), &cmd).await?;

        let (description, dependencies) = Self::parse_detail(&result.stdout);

        Ok(package
            .clone()
            .with_description(description.unwrap_or_default())
            .with_dependencies(dependencies))
    }

    fn kind(&self) -> ManagerKind {
        ManagerKind::Yum
    }
}
