//! Common test helpers for SDK generation pipeline tests

#![allow(dead_code)]

use async_trait::async_trait;
use scalar_kiota_core::{Result, ScalarKiotaError, SpecSource};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One external command observed by [`RecordingRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl RecordedCall {
    /// Command and arguments joined with spaces
    pub fn line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Process runner that records calls and simulates the tools' output
///
/// `kiota generate` drops an `apiClient.ts` into its `--output` directory,
/// `npm` creates a lock file and `node_modules`, and `npx` writes the
/// `--outfile` bundle. Calls whose command line starts with a configured
/// prefix fail with a non-zero exit instead.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    opened: Mutex<Vec<String>>,
    failing: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call whose command line starts with `prefix`
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(RecordedCall::line).collect()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
        self.opened.lock().unwrap().clear();
    }

    fn simulate(call: &RecordedCall) -> std::io::Result<()> {
        match call.command.as_str() {
            "kiota" if call.args.first().map(String::as_str) == Some("generate") => {
                if let Some(output) = value_after(&call.args, "--output") {
                    let output = Path::new(&output);
                    fs::create_dir_all(output.join("models"))?;
                    fs::write(output.join("apiClient.ts"), "export const x = 1;")?;
                    fs::write(output.join("models").join("index.ts"), "export {};")?;
                }
            }
            "npm" => {
                if let Some(dir) = &call.working_dir {
                    fs::create_dir_all(dir.join("node_modules"))?;
                    fs::write(dir.join("package-lock.json"), "{}")?;
                }
            }
            "npx" => {
                if let Some(outfile) = call
                    .args
                    .iter()
                    .find_map(|arg| arg.strip_prefix("--outfile="))
                {
                    fs::write(outfile, "export default {};")?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[async_trait]
impl scalar_kiota_core::ProcessRunner for RecordingRunner {
    async fn run(&self, command: &str, args: &[String], working_dir: Option<&Path>) -> Result<()> {
        let call = RecordedCall {
            command: command.to_string(),
            args: args.to_vec(),
            working_dir: working_dir.map(Path::to_path_buf),
        };
        self.calls.lock().unwrap().push(call.clone());

        let line = call.line();
        if self.failing.iter().any(|prefix| line.starts_with(prefix)) {
            return Err(ScalarKiotaError::external_tool(command, args, "simulated failure"));
        }

        Self::simulate(&call)?;
        Ok(())
    }

    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

fn value_after(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .cloned()
}

/// Spec source serving a fixed document that can be swapped between runs
pub struct StaticSpecSource {
    document: Mutex<String>,
}

impl StaticSpecSource {
    pub fn new(document: &str) -> Self {
        Self {
            document: Mutex::new(document.to_string()),
        }
    }

    pub fn set(&self, document: &str) {
        *self.document.lock().unwrap() = document.to_string();
    }
}

#[async_trait]
impl SpecSource for StaticSpecSource {
    async fn fetch(&self, _server_url: &str) -> Result<String> {
        Ok(self.document.lock().unwrap().clone())
    }
}

/// Minimal OpenAPI document for tests
pub const TODO_SPEC: &str =
    r#"{"openapi":"3.0.1","info":{"title":"Todos","version":"v1"},"paths":{}}"#;
