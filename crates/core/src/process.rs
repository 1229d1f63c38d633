//! External process seam
//!
//! The generator, package manager, bundler and tool installer are all opaque
//! command-line programs. The pipeline only ever talks to them through
//! [`ProcessRunner`], so tests can substitute a recording fake and the
//! concrete OS implementation can live in the infrastructure crate.

use crate::{Result, ScalarKiotaError};
use async_trait::async_trait;
use std::path::Path;

/// Runs external commands to completion
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` with `args`, optionally inside `working_dir`
    ///
    /// Succeeds only when the process exits with status 0. A non-zero exit
    /// is reported as [`ScalarKiotaError::ExternalTool`] carrying the
    /// captured standard error; a process that cannot be started is
    /// reported as [`ScalarKiotaError::Spawn`].
    async fn run(&self, command: &str, args: &[String], working_dir: Option<&Path>) -> Result<()>;

    /// Open `url` in the default viewer, best effort
    fn open_url(&self, url: &str);
}

/// Outcome of a cheap availability check for an external tool
#[derive(Debug)]
pub enum ToolProbe {
    Available,
    Missing(ScalarKiotaError),
}

impl ToolProbe {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Check whether `command` can be run by asking for its version
///
/// Only failures of the tool itself (non-zero exit, spawn failure) mean
/// "missing"; any other error is returned unchanged.
pub async fn probe_tool(runner: &dyn ProcessRunner, command: &str) -> Result<ToolProbe> {
    match runner.run(command, &args(["--version"]), None).await {
        Ok(()) => Ok(ToolProbe::Available),
        Err(err) if err.is_tool_unavailable() => Ok(ToolProbe::Missing(err)),
        Err(err) => Err(err),
    }
}

/// Build an owned argument vector from string-like values
pub fn args<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedRunner {
        outcome: Mutex<Option<ScalarKiotaError>>,
    }

    #[async_trait]
    impl ProcessRunner for ScriptedRunner {
        async fn run(&self, _command: &str, _args: &[String], _dir: Option<&Path>) -> Result<()> {
            match self.outcome.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn open_url(&self, _url: &str) {}
    }

    fn runner(outcome: Option<ScalarKiotaError>) -> ScriptedRunner {
        ScriptedRunner {
            outcome: Mutex::new(outcome),
        }
    }

    #[tokio::test]
    async fn test_probe_available_on_success() {
        let probe = probe_tool(&runner(None), "kiota").await.unwrap();
        assert!(probe.is_available());
    }

    #[tokio::test]
    async fn test_probe_missing_on_non_zero_exit() {
        let err = ScalarKiotaError::external_tool("kiota", &args(["--version"]), "boom");
        let probe = probe_tool(&runner(Some(err)), "kiota").await.unwrap();
        assert!(matches!(probe, ToolProbe::Missing(_)));
    }

    #[tokio::test]
    async fn test_probe_missing_on_spawn_failure() {
        let err = ScalarKiotaError::spawn(
            "kiota",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let probe = probe_tool(&runner(Some(err)), "kiota").await.unwrap();
        assert!(!probe.is_available());
    }

    #[tokio::test]
    async fn test_probe_propagates_unrelated_errors() {
        let err = ScalarKiotaError::validation("unrelated");
        let result = probe_tool(&runner(Some(err)), "kiota").await;
        assert!(matches!(result, Err(ScalarKiotaError::Validation { .. })));
    }

    #[test]
    fn test_args_helper() {
        assert_eq!(args(["ci", "--no-audit"]), vec!["ci", "--no-audit"]);
    }
}
