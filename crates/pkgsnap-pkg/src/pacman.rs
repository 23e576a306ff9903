//! Pacman backend (Arch Linux)

use std::sync::Arc;

use async_trait::async_trait;
use pkgsnap_exec::traits::CommandExecutor;
use tracing::{debug, info, instrument, warn};

use crate::error::PackageError;
use crate::runner::{finish_listing, run_query};
use crate::traits::PackageBackend;
use crate::types::{ManagerKind, Package};

/// Pacman backend
pub struct PacmanBackend {
    executor: Arc<dyn CommandExecutor>,
}

impl PacmanBackend {
    /// Create a new Pacman backend
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Parse `pacman -Q` output: `name version` per line
    fn parse_listing(output: &str) -> Result<Vec<Package>, PackageError> {
        let mut packages = Vec::new();
        let mut skipped = 0usize;

        for line in output.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() == 2 {
                packages.push(Package::new(parts[0], parts[1]));
            } else {
                warn!(line = %line, "skipping malformed pacman line");
                skipped += 1;
            }
        }

        finish_listing(packages, skipped, "pacman")
    }

    /// Parse `pacman -Qi` output for the Description and Depends On fields
    fn parse_info(output: &str) -> (Option<String>, Option<Vec<String>>) {
        let mut description = None;
        let mut dependencies = None;

        for line in output.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            match key.trim() {
                "Description" => description = Some(value.trim().to_string()),
                "Depends On" => {
                    let value = value.trim();
                    let deps = if value == "None" {
                        Vec::new()
                    } else {
                        value.split_whitespace().map(str::to_string).collect()
                    };
                    dependencies = Some(deps);
                }
                _ => {}
            }
        }

        (description, dependencies)
    }
}

#[async_trait]
impl PackageBackend for PacmanBackend {
    #[instrument(skip(self))]
    async fn list_packages(&self) -> Result<Vec<Package>, PackageError> {
        debug!("listing installed packages via pacman");

        let result = run_query(self.executor.as_ref(), "pacman -Q").await?;

        let packages = Self::parse_listing(&result.stdout)?;
        info!(count = packages.len(), "listed installed packages");

        Ok(packages)
    }

    async fn detail(&self, package: &Package) -> Result<Package, PackageError> {
        let cmd = format!("pacman -Qi {}", package.name);
        let result = run_query(self.executor.as_ref(), &cmd).await?;

        let (description, dependencies) = Self::parse_info(&result.stdout);

        Ok(package
            .clone()
            .with_description(description.unwrap_or_default())
            .with_dependencies(dependencies.unwrap_or_default()))
    }

    fn kind(&self) -> ManagerKind {
        ManagerKind::Pacman
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing() {
        let output = "bash 5.2.026-2\nglibc 2.39+r52+gf8e4623421-1\npacman 6.1.0-3\n";

        let packages = PacmanBackend::parse_listing(output).unwrap();

        assert_eq!(packages.len(), 3);
        assert_eq!(packages[0].name, "bash");
        assert_eq!(packages[0].version, "5.2.026-2");
        assert_eq!(packages[1].version, "2.39+r52+gf8e4623421-1");
    }

    #[test]
    fn test_parse_listing_empty_install() {
        let packages = PacmanBackend::parse_listing("").unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn test_parse_info() {
        let output = "Name            : bash\n\
                      Version         : 5.2.026-2\n\
                      Description     : The GNU Bourne Again shell\n\
                      Depends On      : readline  libreadline.so=8-64  glibc  ncurses\n\
                      Optional Deps   : None\n";

        let (description, dependencies) = PacmanBackend::parse_info(output);

        assert_eq!(description.as_deref(), Some("The GNU Bourne Again shell"));
        assert_eq!(
            dependencies.unwrap(),
            vec!["readline", "libreadline.so=8-64", "glibc", "ncurses"]
        );
    }

    #[test]
    fn test_parse_info_no_depends() {
        let output = "Description     : Minimal base package\nDepends On      : None\n";

        let (_, dependencies) = PacmanBackend::parse_info(output);

        assert_eq!(dependencies.unwrap(), Vec::<String>::new());
    }
}
