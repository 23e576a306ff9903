//! Report type definitions

use chrono::{DateTime, Utc};
use pkgsnap_pkg::types::Package;
use serde::{Deserialize, Serialize};

/// Sentinel for host facts that could not be determined
pub const UNKNOWN: &str = "unknown";

/// Host identity facts, collected once per run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMetadata {
    /// Hostname
    pub hostname: String,
    /// OS distribution name
    pub os_name: String,
    /// OS distribution version
    pub os_version: String,
    /// Kernel release
    pub kernel_version: String,
    /// Version of this collector
    pub collector_version: String,
    /// Toolchain version the collector was built for
    pub runtime_version: String,
    /// When collection ran
    pub collection_timestamp: DateTime<Utc>,
}

/// One point-in-time snapshot of a host's installed packages
///
/// The sole unit of serialization; owns its metadata and package values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Host identity facts
    pub metadata: SystemMetadata,
    /// Identifier of the detected backend
    pub package_manager: String,
    /// Whether detail fields were requested for this report
    pub detailed: bool,
    /// Installed packages, manager enumeration order
    pub packages: Vec<Package>,
}
