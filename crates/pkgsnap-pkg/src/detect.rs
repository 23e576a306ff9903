//! Package manager detection

use std::sync::Arc;

use pkgsnap_exec::traits::CommandExecutor;
use tracing::{debug, info, instrument};

use crate::apt::AptBackend;
use crate::error::PackageError;
use crate::pacman::PacmanBackend;
use crate::traits::PackageBackend;
use crate::types::ManagerKind;
use crate::yum::YumBackend;
use crate::zypper::ZypperBackend;

/// Detect which package manager governs this host
///
/// Probes each manager's query tool on the search path in fixed priority
/// order (apt, yum, pacman, zypper) and returns the first match. The order
/// is absolute: rpm-based hosts carrying additional tooling still resolve
/// to the highest-priority probe that hits.
///
/// # Errors
/// Returns [`PackageError::NoSupportedManager`] if no probe resolves.
#[instrument(skip(executor))]
pub async fn detect_manager(
    executor: &dyn CommandExecutor,
) -> Result<ManagerKind, PackageError> {
    for kind in ManagerKind::DETECTION_ORDER {
        let cmd = format!("command -v {}", kind.probe_tool());
        let available = executor
            .run(&cmd)
            .await
            .map(|r| r.success())
            .unwrap_or(false);

        debug!(manager = %kind, tool = kind.probe_tool(), available, "probed");

        if available {
            info!(manager = %kind, "detected package manager");
            return Ok(kind);
        }
    }

    Err(PackageError::NoSupportedManager)
}

/// Construct the backend for a detected manager
#[must_use]
pub fn backend_for(
    kind: ManagerKind,
    executor: Arc<dyn CommandExecutor>,
) -> Box<dyn PackageBackend> {
    match kind {
        ManagerKind::Apt => Box::new(AptBackend::new(executor)),
        ManagerKind::Yum => Box::new(YumBackend::new(executor)),
        ManagerKind::Pacman => Box::new(PacmanBackend::new(executor)),
        ManagerKind::Zypper => Box::new(ZypperBackend::new(executor)),
    }
}
