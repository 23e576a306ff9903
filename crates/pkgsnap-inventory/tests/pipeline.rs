//! End-to-end pipeline tests against a scripted executor

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use pkgsnap_exec::error::ExecError;
use pkgsnap_exec::result::CommandResult;
use pkgsnap_exec::traits::CommandExecutor;
use pkgsnap_inventory::collector::MetadataCollector;
use pkgsnap_inventory::report::assemble_report;
use pkgsnap_inventory::serialize::{ReportFormat, render};
use pkgsnap_inventory::types::{Report, UNKNOWN};
use pkgsnap_pkg::detect::{backend_for, detect_manager};
use pkgsnap_pkg::error::PackageError;
use pkgsnap_pkg::types::ManagerKind;

/// Executor returning scripted results; unknown commands fail like a
/// missing binary
struct MockExecutor {
    responses: HashMap<String, CommandResult>,
}

impl MockExecutor {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    fn on_success(mut self, cmd: &str, stdout: &str) -> Self {
        self.responses.insert(
            cmd.to_string(),
            CommandResult {
                status: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
                duration: Duration::from_millis(1),
            },
        );
        self
    }

    fn on_failure(mut self, cmd: &str, status: i32, stderr: &str) -> Self {
        self.responses.insert(
            cmd.to_string(),
            CommandResult {
                status,
                stdout: String::new(),
                stderr: stderr.to_string(),
                duration: Duration::from_millis(1),
            },
        );
        self
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn run(&self, cmd: &str) -> Result<CommandResult, ExecError> {
        Ok(self.responses.get(cmd).cloned().unwrap_or(CommandResult {
            status: 127,
            stdout: String::new(),
            stderr: format!("{cmd}: not found"),
            duration: Duration::from_millis(1),
        }))
    }

    async fn run_with_timeout(
        &self,
        cmd: &str,
        _timeout: Duration,
    ) -> Result<CommandResult, ExecError> {
        self.run(cmd).await
    }
}

const APT_LISTING: &str = r"dpkg-query -W -f='${Package}\t${Version}\n'";

#[tokio::test]
async fn test_detection_priority_is_absolute() {
    // rpm, pacman and zypper all resolve; yum must win because apt's
    // probe misses and the order never falls through past the first hit
    let executor = MockExecutor::new()
        .on_failure("command -v dpkg-query", 1, "")
        .on_success("command -v rpm", "/usr/bin/rpm")
        .on_success("command -v pacman", "/usr/bin/pacman")
        .on_success("command -v zypper", "/usr/bin/zypper");

    let kind = detect_manager(&executor).await.unwrap();

    assert_eq!(kind, ManagerKind::Yum);
}

#[tokio::test]
async fn test_detection_apt_first() {
    let executor = MockExecutor::new()
        .on_success("command -v dpkg-query", "/usr/bin/dpkg-query")
        .on_success("command -v rpm", "/usr/bin/rpm");

    let kind = detect_manager(&executor).await.unwrap();

    assert_eq!(kind, ManagerKind::Apt);
}

#[tokio::test]
async fn test_detection_none_found() {
    let executor = MockExecutor::new();

    let result = detect_manager(&executor).await;

    assert!(matches!(result, Err(PackageError::NoSupportedManager)));
}

#[tokio::test]
async fn test_empty_install_yields_empty_listing() {
    let executor = Arc::new(MockExecutor::new().on_success(APT_LISTING, ""));
    let backend = backend_for(ManagerKind::Apt, executor);

    let packages = backend.list_packages().await.unwrap();

    assert!(packages.is_empty());
}

#[tokio::test]
async fn test_listing_failure_is_fatal() {
    let executor =
        Arc::new(MockExecutor::new().on_failure(APT_LISTING, 2, "dpkg database locked"));
    let backend = backend_for(ManagerKind::Apt, executor);

    let result = backend.list_packages().await;

    assert!(matches!(result, Err(PackageError::CommandFailed { .. })));
}

#[tokio::test]
async fn test_detail_failure_degrades_single_entry() {
    let executor = Arc::new(
        MockExecutor::new()
            .on_success(APT_LISTING, "bash\t5.2.15-2\nvim\t2:9.0.1378-2\n")
            .on_success(
                "dpkg-query --status bash",
                "Package: bash\nDepends: base-files, libc6 (>= 2.36)\nDescription: GNU Bourne Again shell\n",
            )
            .on_failure("dpkg-query --status vim", 1, "package 'vim' error"),
    );
    let backend = backend_for(ManagerKind::Apt, executor);

    let packages = backend.enumerate(true).await.unwrap();

    // Order preserved, failed entry kept with both detail fields absent
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].name, "bash");
    assert!(packages[0].has_detail());
    assert_eq!(
        packages[0].dependencies.clone().unwrap(),
        vec!["base-files", "libc6"]
    );
    assert_eq!(packages[1].name, "vim");
    assert_eq!(packages[1].version, "2:9.0.1378-2");
    assert!(packages[1].description.is_none());
    assert!(packages[1].dependencies.is_none());

    // The degraded listing still assembles into a valid detailed report
    let executor = Arc::new(MockExecutor::new());
    let metadata = MetadataCollector::new(executor).collect().await;
    let report = assemble_report(ManagerKind::Apt, packages, metadata, true).unwrap();
    assert!(report.detailed);
}

#[tokio::test]
async fn test_enumeration_order_is_preserved() {
    // Deliberately unsorted listing; the report must keep this order
    let executor = Arc::new(MockExecutor::new().on_success(
        APT_LISTING,
        "zlib1g\t1:1.2.13\nbash\t5.2.15-2\nacl\t2.3.1-3\n",
    ));
    let backend = backend_for(ManagerKind::Apt, executor);

    let packages = backend.enumerate(false).await.unwrap();

    let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["zlib1g", "bash", "acl"]);
}

#[tokio::test]
async fn test_metadata_degrades_to_unknown() {
    // Only the kernel probe answers
    let executor = Arc::new(MockExecutor::new().on_success("uname -r", "6.1.0-18-amd64\n"));

    let metadata = MetadataCollector::new(executor).collect().await;

    assert_eq!(metadata.hostname, UNKNOWN);
    assert_eq!(metadata.os_name, UNKNOWN);
    assert_eq!(metadata.os_version, UNKNOWN);
    assert_eq!(metadata.kernel_version, "6.1.0-18-amd64");
    assert_eq!(metadata.collector_version, env!("CARGO_PKG_VERSION"));
    // The toolchain floor comes from the manifest, not a host probe, and
    // is never the bare "rust " prefix
    assert_eq!(metadata.runtime_version, "rust 1.85");
}

#[tokio::test]
async fn test_full_pipeline_round_trips() {
    let executor: Arc<MockExecutor> = Arc::new(
        MockExecutor::new()
            .on_success("command -v dpkg-query", "/usr/bin/dpkg-query")
            .on_success(APT_LISTING, "bash\t5.2.15-2\nzlib1g\t1:1.2.13.dfsg-1\n")
            .on_success("hostname", "testhost\n")
            .on_success(
                "cat /etc/os-release",
                "NAME=\"Debian GNU/Linux\"\nVERSION_ID=\"12\"\n",
            )
            .on_success("uname -r", "6.1.0-18-amd64\n"),
    );

    let kind = detect_manager(executor.as_ref()).await.unwrap();
    let backend = backend_for(kind, executor.clone());
    let packages = backend.enumerate(false).await.unwrap();
    let metadata = MetadataCollector::new(executor).collect().await;
    let report = assemble_report(kind, packages, metadata, false).unwrap();

    assert_eq!(report.package_manager, "apt");
    assert_eq!(report.metadata.hostname, "testhost");
    assert_eq!(report.metadata.os_version, "12");

    let bytes = render(&report, ReportFormat::Json, false).unwrap();
    let parsed: Report = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed, report);
}
