//! Common test helpers for host integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use scalar_kiota_core::{ProcessRunner, Result, ScalarKiotaError, SpecSource};
use std::path::Path;
use std::sync::Mutex;

/// Process runner that only records command lines
#[derive(Default)]
pub struct RecordingRunner {
    lines: Mutex<Vec<String>>,
}

impl RecordingRunner {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, command: &str, args: &[String], _working_dir: Option<&Path>) -> Result<()> {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{} {}", command, args.join(" ")));
        Ok(())
    }

    fn open_url(&self, _url: &str) {}
}

/// Spec source that records the server URLs it was asked for
pub struct RecordingSpecSource {
    document: Option<String>,
    requested: Mutex<Vec<String>>,
}

impl RecordingSpecSource {
    pub fn serving(document: &str) -> Self {
        Self {
            document: Some(document.to_string()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            document: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpecSource for RecordingSpecSource {
    async fn fetch(&self, server_url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(server_url.to_string());
        self.document
            .clone()
            .ok_or_else(|| ScalarKiotaError::spec_unavailable(server_url, "connection refused"))
    }
}
