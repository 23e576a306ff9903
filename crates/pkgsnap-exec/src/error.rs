//! Error types for pkgsnap-exec

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while executing external commands
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// Command exited non-zero
    #[error("command failed: {status} - {stderr}")]
    CommandFailed {
        /// Exit status code
        status: i32,
        /// Stderr output
        stderr: String,
    },

    /// Command timed out
    #[error("command timed out after {timeout:?}")]
    Timeout {
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// Process spawn error
    #[error("failed to spawn process: {0}")]
    SpawnError(String),

    /// I/O error during execution
    #[error("I/O error: {0}")]
    IoError(String),
}
