//! Error types for pkgsnap-pkg

use thiserror::Error;

/// Errors that can occur during package manager operations
#[derive(Error, Debug, Clone)]
pub enum PackageError {
    /// No recognized package manager found on the system
    #[error("no supported package manager found (probed apt, yum, pacman, zypper)")]
    NoSupportedManager,

    /// Listing or query command exited non-zero
    #[error("command failed: {status} - {message}")]
    CommandFailed {
        /// Exit status
        status: i32,
        /// Error message
        message: String,
    },

    /// Failed to parse command output
    #[error("parse error: {0}")]
    ParseError(String),

    /// Execution error from the command executor
    #[error("execution error: {0}")]
    ExecutionError(String),
}
