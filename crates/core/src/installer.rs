//! npm dependency installation for the generated TypeScript SDK
//!
//! | lock file | node_modules | lock newer than manifest | action          |
//! |-----------|--------------|--------------------------|-----------------|
//! | no        | any          | -                        | `npm install`   |
//! | yes       | no           | any                      | `npm ci`        |
//! | yes       | yes          | no                       | `npm ci`        |
//! | yes       | yes          | yes                      | skip            |

use crate::layout::CacheLayout;
use crate::process::{args, ProcessRunner};
use crate::Result;
use std::path::Path;
use tokio::fs;

/// Package manager executable
pub const PACKAGE_MANAGER: &str = "npm";

/// Flags that silence audit and funding output
const QUIET_FLAGS: [&str; 2] = ["--no-audit", "--no-fund"];

/// What the installer decided to do for a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    /// Dependencies are current
    Skip,
    /// Reproducible install from the existing lock file
    CleanInstall,
    /// Resolving install that creates the lock file
    ResolveInstall,
}

impl InstallAction {
    /// Package-manager arguments for this action, if any
    pub fn command_args(&self) -> Option<Vec<String>> {
        let subcommand = match self {
            Self::Skip => return None,
            Self::CleanInstall => "ci",
            Self::ResolveInstall => "install",
        };
        Some(args(std::iter::once(subcommand).chain(QUIET_FLAGS)))
    }
}

/// Decide how to bring the dependencies in `dir` up to date
pub async fn plan_install(dir: &Path) -> Result<InstallAction> {
    let lock_path = CacheLayout::lock_path(dir);
    if !fs::try_exists(&lock_path).await? {
        return Ok(InstallAction::ResolveInstall);
    }

    let dependencies_dir = CacheLayout::dependencies_dir(dir);
    if !fs::try_exists(&dependencies_dir).await? {
        return Ok(InstallAction::CleanInstall);
    }

    let manifest_time = fs::metadata(CacheLayout::manifest_path(dir))
        .await?
        .modified()?;
    let lock_time = fs::metadata(&lock_path).await?.modified()?;

    if lock_time >= manifest_time {
        Ok(InstallAction::Skip)
    } else {
        Ok(InstallAction::CleanInstall)
    }
}

/// Runs the package manager when the SDK's dependencies are stale
pub struct DependencyInstaller<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> DependencyInstaller<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Install dependencies in `dir` unless they are already current
    pub async fn ensure_dependencies(&self, dir: &Path) -> Result<InstallAction> {
        let action = plan_install(dir).await?;

        match action.command_args() {
            None => tracing::debug!(dir = %dir.display(), "NPM dependencies are up-to-date"),
            Some(install_args) => {
                tracing::info!(dir = %dir.display(), "Installing NPM dependencies...");
                self.runner
                    .run(PACKAGE_MANAGER, &install_args, Some(dir))
                    .await?;
            }
        }

        Ok(action)
    }
}
