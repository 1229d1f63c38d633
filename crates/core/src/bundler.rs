//! Browser bundle of the generated TypeScript SDK

use crate::process::{args, ProcessRunner};
use crate::{Result, ScalarKiotaError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Launcher used to run the bundler without a global install
pub const BUNDLER_LAUNCHER: &str = "npx";

/// Bundler package run through the launcher
pub const BUNDLER_PACKAGE: &str = "esbuild";

/// Lowest ECMAScript version the bundle targets
pub const BUNDLE_TARGET: &str = "es2020";

/// Find the bundler entry point directly inside `dir`
///
/// The first `.ts` file that is not a `.d.ts` declaration file wins.
/// Candidates are taken in file-name order so the choice does not depend on
/// the platform's directory listing order.
pub async fn find_entry_point(dir: &Path) -> Result<PathBuf> {
    let mut entries = fs::read_dir(dir).await?;
    let mut candidates = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        if is_entry_candidate(&path) {
            candidates.push(path);
        }
    }

    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| ScalarKiotaError::no_entry_point(dir))
}

fn is_entry_candidate(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}

/// Bundler argument list for `entry`, written to `outfile`
pub fn bundle_args(entry: &Path, outfile: &Path) -> Vec<String> {
    let mut bundle_args = args(["--yes", BUNDLER_PACKAGE]);
    bundle_args.push(entry.display().to_string());
    bundle_args.extend(args([
        "--bundle",
        "--format=esm",
        "--platform=browser",
    ]));
    bundle_args.push(format!("--target={}", BUNDLE_TARGET));
    bundle_args.extend(args(["--minify", "--tree-shaking=true"]));
    bundle_args.push(format!("--outfile={}", outfile.display()));
    bundle_args
}

/// Bundles a generated SDK directory into a single ES module
pub struct Bundler<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> Bundler<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Bundle the SDK in `dir` into `outfile`
    pub async fn bundle(&self, dir: &Path, outfile: &Path) -> Result<PathBuf> {
        let entry = find_entry_point(dir).await?;

        tracing::info!(entry = %entry.display(), "Bundling TypeScript SDK...");
        self.runner
            .run(BUNDLER_LAUNCHER, &bundle_args(&entry, outfile), Some(dir))
            .await?;

        Ok(outfile.to_path_buf())
    }
}
