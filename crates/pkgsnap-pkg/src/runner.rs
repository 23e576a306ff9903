//! Shared query execution and parse bookkeeping for backends

use std::time::Duration;

use pkgsnap_exec::result::CommandResult;
use pkgsnap_exec::traits::CommandExecutor;

use crate::error::PackageError;
use crate::types::Package;

/// Bounded timeout for every external package-manager invocation
pub(crate) const QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Run a query command, capture stdout, map any failure to [`PackageError`]
pub(crate) async fn run_query(
    executor: &dyn CommandExecutor,
    cmd: &str,
) -> Result<CommandResult, PackageError> {
    let result = executor
        .run_with_timeout(cmd, QUERY_TIMEOUT)
        .await
        .map_err(|e| PackageError::ExecutionError(e.to_string()))?;

    if !result.success() {
        return Err(PackageError::CommandFailed {
            status: result.status,
            message: result.stderr,
        });
    }

    Ok(result)
}

/// Finalize a listing parse: zero packages from a non-empty output is a
/// parse failure, zero packages from zero candidate lines is an empty
/// install
pub(crate) fn finish_listing(
    packages: Vec<Package>,
    skipped: usize,
    tool: &str,
) -> Result<Vec<Package>, PackageError> {
    if packages.is_empty() && skipped > 0 {
        return Err(PackageError::ParseError(format!(
            "no parsable entries in {tool} output ({skipped} lines skipped)"
        )));
    }
    Ok(packages)
}
