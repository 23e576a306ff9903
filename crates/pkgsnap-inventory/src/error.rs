//! Error types for pkgsnap-inventory

use thiserror::Error;

/// Errors that can occur during report assembly and serialization
#[derive(Error, Debug, Clone)]
pub enum InventoryError {
    /// Backend output broke the detailed-mode contract
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Report could not be serialized
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Writing the report failed
    #[error("I/O error: {0}")]
    Io(String),
}
