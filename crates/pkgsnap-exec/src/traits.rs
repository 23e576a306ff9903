//! Command executor trait

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::CommandResult;

/// Executes external commands and captures their output.
///
/// All package-manager queries and metadata probes go through this trait so
/// that backends can be exercised against scripted output in tests.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a command and wait for it to finish
    async fn run(&self, cmd: &str) -> Result<CommandResult, ExecError>;

    /// Run a command, failing with [`ExecError::Timeout`] if it does not
    /// finish within `timeout`
    async fn run_with_timeout(
        &self,
        cmd: &str,
        timeout: Duration,
    ) -> Result<CommandResult, ExecError>;
}
