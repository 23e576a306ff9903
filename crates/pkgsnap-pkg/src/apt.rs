//! APT backend (Debian/Ubuntu)

use std::sync::Arc;

use async_trait::async_trait;
use pkgsnap_exec::traits::CommandExecutor;
use tracing::{debug, info, instrument, warn};

use crate::error::PackageError;
use crate::runner::{finish_listing, run_query};
use crate::traits::PackageBackend;
use crate::types::{ManagerKind, Package};

/// APT backend
///
/// Lists via `dpkg-query -W` with an explicit format string and fetches
/// detail from `dpkg-query --status`.
pub struct AptBackend {
    executor: Arc<dyn CommandExecutor>,
}

impl AptBackend {
    /// Create a new APT backend
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Parse `dpkg-query -W -f='${Package}\t${Version}\n'` output
    fn parse_listing(output: &str) -> Result<Vec<Package>, PackageError> {
        let mut packages = Vec::new();
        let mut skipped = 0usize;

        for line in output.lines() {
            if line.trim().is_empty() {
                continue;
            }

            // name<TAB>version
            let mut fields = line.splitn(2, '\t');
            match (fields.next(), fields.next()) {
                (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
                    packages.push(Package::new(name, version));
                }
                _ => {
                    warn!(line = %line, "skipping malformed dpkg-query line");
                    skipped += 1;
                }
            }
        }

        finish_listing(packages, skipped, "dpkg-query")
    }

    /// Parse `dpkg-query --status` control-file output for detail fields
    fn parse_status(output: &str) -> (Option<String>, Option<Vec<String>>) {
        let mut description = None;
        let mut dependencies = None;

        for line in output.lines() {
            if let Some(rest) = line.strip_prefix("Description: ") {
                // First line is the summary; continuation lines are the
                // long description and are not carried
                description = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("Depends: ") {
                dependencies = Some(Self::parse_depends(rest));
            }
        }

        (description, dependencies)
    }

    /// Parse a Depends field: comma-separated entries, first alternative
    /// of each `a | b` group, version constraints stripped
    fn parse_depends(field: &str) -> Vec<String> {
        field
            .split(',')
            .filter_map(|entry| {
                let first_alt = entry.split('|').next()?;
                let name = first_alt
                    .trim()
                    .split(&[' ', '('][..])
                    .next()?
                    .trim()
                    .to_string();
                if name.is_empty() { None } else { Some(name) }
            })
            .collect()
    }
}

#[async_trait]
impl PackageBackend for AptBackend {
    #[instrument(skip(self))]
    async fn list_packages(&self) -> Result<Vec<Package>, PackageError> {
        debug!("listing installed packages via dpkg-query");

        let result = run_query(
            self.executor.as_ref(),
            r"dpkg-query -W -f='${Package}\t${Version}\n'",
        )
        .await?;

        let packages = Self::parse_listing(&result.stdout)?;
        info!(count = packages.len(), "listed installed packages");

        Ok(packages)
    }

    async fn detail(&self, package: &Package) -> Result<Package, PackageError> {
        let cmd = format!("dpkg-query --status {}", package.name);
        let result = run_query(self.executor.as_ref(), &cmd).await?;

        let (description, dependencies) = Self::parse_status(&result.stdout);

        Ok(package
            .clone()
            .with_description(description.unwrap_or_default())
            .with_dependencies(dependencies.unwrap_or_default()))
    }

    fn kind(&self) -> ManagerKind {
        ManagerKind::Apt
    }
}
