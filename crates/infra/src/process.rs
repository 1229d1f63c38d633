//! Operating-system process runner
//!
//! Implements the core [`ProcessRunner`] seam on top of `tokio::process`.
//! Output streams are captured; standard error becomes part of the error
//! when a command exits with a non-zero status.

use async_trait::async_trait;
use scalar_kiota_core::{ProcessRunner, Result, ScalarKiotaError};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs commands as child processes of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(&self, command: &str, args: &[String], working_dir: Option<&Path>) -> Result<()> {
        let mut child = platform_command(command);
        child
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            child.current_dir(dir);
        }

        debug!(command, args = ?args, dir = ?working_dir, "Running external command");
        let output = child
            .output()
            .await
            .map_err(|e| ScalarKiotaError::spawn(command, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScalarKiotaError::external_tool(
                command,
                args,
                stderr.trim(),
            ));
        }

        debug!(
            command,
            stdout_bytes = output.stdout.len(),
            "External command finished"
        );
        Ok(())
    }

    fn open_url(&self, url: &str) {
        let (program, viewer_args) = viewer_command(url);
        let spawned = std::process::Command::new(program)
            .args(&viewer_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut viewer) => {
                // Reap the viewer without blocking the caller
                std::thread::spawn(move || {
                    let _ = viewer.wait();
                });
            }
            Err(e) => warn!(url, error = %e, "Failed to open browser"),
        }
    }
}

/// Command for `program`, routed through the shell where scripts need it
fn platform_command(program: &str) -> Command {
    if cfg!(windows) {
        // npm and npx are batch scripts on Windows
        let mut command = Command::new("cmd");
        command.arg("/C").arg(program);
        command
    } else {
        Command::new(program)
    }
}

/// Program and arguments that open `url` in the default browser
pub fn viewer_command(url: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "windows") {
        (
            "cmd",
            vec![
                "/C".to_string(),
                "start".to_string(),
                String::new(),
                url.to_string(),
            ],
        )
    } else if cfg!(target_os = "macos") {
        ("open", vec![url.to_string()])
    } else {
        ("xdg-open", vec![url.to_string()])
    }
}
