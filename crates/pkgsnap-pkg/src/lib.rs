//! pkgsnap-pkg: Package manager abstraction
//!
//! Provides the backend trait and implementations for the supported
//! package managers (apt, yum/rpm, pacman, zypper) plus manager detection.

pub mod apt;
pub mod detect;
pub mod error;
pub mod pacman;
mod runner;
pub mod traits;
pub mod types;
pub mod yum;
pub mod zypper;

pub use detect::{backend_for, detect_manager};
pub use error::PackageError;
pub use traits::PackageBackend;
pub use types::{ManagerKind, Package};
