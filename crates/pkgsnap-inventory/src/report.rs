//! Report assembly

use pkgsnap_pkg::types::{ManagerKind, Package};
use tracing::{debug, instrument};

use crate::error::InventoryError;
use crate::types::{Report, SystemMetadata};

/// Assemble the final report from backend output and host metadata
///
/// Validates the detailed-mode contract: within one report the detail
/// fields of every package are both present or both absent, and a
/// non-detailed report carries no detail fields at all. A violation means
/// a backend bug, not bad host state.
///
/// # Errors
/// Returns [`InventoryError::InvariantViolation`] if the contract is broken.
#[instrument(skip(packages, metadata), fields(manager = %manager, count = packages.len()))]
pub fn assemble_report(
    manager: ManagerKind,
    packages: Vec<Package>,
    metadata: SystemMetadata,
    detailed: bool,
) -> Result<Report, InventoryError> {
    for package in &packages {
        if package.description.is_some() != package.dependencies.is_some() {
            return Err(InventoryError::InvariantViolation(format!(
                "package {} has exactly one of description/dependencies",
                package.name
            )));
        }
        if !detailed && package.description.is_some() {
            return Err(InventoryError::InvariantViolation(format!(
                "package {} carries detail fields in a basic report",
                package.name
            )));
        }
    }

    debug!("report assembled");

    Ok(Report {
        metadata,
        package_manager: manager.to_string(),
        detailed,
        packages,
    })
}
