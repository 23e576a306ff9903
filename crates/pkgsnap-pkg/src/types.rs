//! Type definitions for package enumeration

use serde::{Deserialize, Serialize};

/// An installed package
///
/// `version` is the manager-native version string, passed through verbatim.
/// The detail fields are populated only in detailed mode; within one report
/// they are either both present or both absent for every entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    pub name: String,
    /// Installed version, manager-native format
    pub version: String,
    /// One-line package summary (detailed mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared dependencies, manager output order (detailed mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

impl Package {
    /// Create a new package with name and version only
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            dependencies: None,
        }
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set dependencies
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    /// Check whether both detail fields are populated
    #[must_use]
    pub fn has_detail(&self) -> bool {
        self.description.is_some() && self.dependencies.is_some()
    }
}

/// Supported package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerKind {
    /// APT (Debian/Ubuntu)
    Apt,
    /// YUM/RPM (Fedora/RHEL/CentOS)
    Yum,
    /// Pacman (Arch Linux)
    Pacman,
    /// Zypper (openSUSE/SLES)
    Zypper,
}

impl ManagerKind {
    /// Fixed detection priority; the first resolvable probe tool wins
    pub const DETECTION_ORDER: [ManagerKind; 4] = [
        ManagerKind::Apt,
        ManagerKind::Yum,
        ManagerKind::Pacman,
        ManagerKind::Zypper,
    ];

    /// Marker executable probed during detection
    #[must_use]
    pub fn probe_tool(&self) -> &'static str {
        match self {
            ManagerKind::Apt => "dpkg-query",
            ManagerKind::Yum => "rpm",
            ManagerKind::Pacman => "pacman",
            ManagerKind::Zypper => "zypper",
        }
    }
}

impl std::fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManagerKind::Apt => write!(f, "apt"),
            ManagerKind::Yum => write!(f, "yum"),
            ManagerKind::Pacman => write!(f, "pacman"),
            ManagerKind::Zypper => write!(f, "zypper"),
        }
    }
}
