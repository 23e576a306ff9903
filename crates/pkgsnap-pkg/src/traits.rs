//! Package backend trait

use async_trait::async_trait;
use tracing::warn;

use crate::error::PackageError;
use crate::types::{ManagerKind, Package};

/// Common capability set of all package manager backends
#[async_trait]
pub trait PackageBackend: Send + Sync {
    /// List installed packages (name and version only), in the manager's
    /// native enumeration order
    ///
    /// # Errors
    /// Returns an error if the listing command fails or its output is
    /// completely unparsable. A manager with zero installed packages
    /// yields `Ok(vec![])`.
    async fn list_packages(&self) -> Result<Vec<Package>, PackageError>;

    /// Fetch description and dependencies for one package, returning an
    /// augmented copy
    ///
    /// # Errors
    /// Returns an error if the per-package query fails; callers degrade to
    /// the basic entry rather than failing the run.
    async fn detail(&self, package: &Package) -> Result<Package, PackageError>;

    /// Which manager this backend drives
    fn kind(&self) -> ManagerKind;

    /// List packages, augmenting each with detail when `detailed` is set
    ///
    /// Detail queries run per package; a failed query keeps the basic
    /// entry and logs a warning. The result preserves enumeration order.
    ///
    /// # Errors
    /// Returns an error only if the initial listing fails.
    async fn enumerate(&self, detailed: bool) -> Result<Vec<Package>, PackageError> {
        let packages = self.list_packages().await?;
        if !detailed {
            return Ok(packages);
        }

        let mut result = Vec::with_capacity(packages.len());
        for package in packages {
            match self.detail(&package).await {
                Ok(detailed_pkg) => result.push(detailed_pkg),
                Err(e) => {
                    warn!(
                        package = %package.name,
                        error = %e,
                        "detail query failed, keeping basic entry"
                    );
                    result.push(package);
                }
            }
        }
        Ok(result)
    }
}
