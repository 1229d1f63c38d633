//! On-disk layout of the SDK cache
//!
//! Every artifact lives at a fixed name under the output root:
//!
//! ```text
//! {root}/openapi.json          last downloaded document
//! {root}/.spec.hash            fingerprint of that document
//! {root}/config.js             runtime loader script
//! {root}/sdk.js                browser bundle of the TypeScript SDK
//! {root}/{language}/           generator output per language
//! ```

use crate::language::output_dir_name;
use std::path::{Path, PathBuf};

/// Name of the hidden directory under the web root used by default
pub const DEFAULT_OUTPUT_DIR: &str = ".scalar-kiota";
pub const SPEC_FILE: &str = "openapi.json";
pub const HASH_FILE: &str = ".spec.hash";
pub const CONFIG_FILE: &str = "config.js";
pub const BUNDLE_FILE: &str = "sdk.js";
pub const MANIFEST_FILE: &str = "package.json";
pub const LOCK_FILE: &str = "package-lock.json";
pub const DEPENDENCIES_DIR: &str = "node_modules";

/// Paths of the cache artifacts rooted at one output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    /// Create a layout rooted at `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Layout for the default location under a host's web root
    pub fn under_web_root<P: AsRef<Path>>(web_root: P) -> Self {
        Self::new(web_root.as_ref().join(DEFAULT_OUTPUT_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn spec_path(&self) -> PathBuf {
        self.root.join(SPEC_FILE)
    }

    pub fn hash_path(&self) -> PathBuf {
        self.root.join(HASH_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn bundle_path(&self) -> PathBuf {
        self.root.join(BUNDLE_FILE)
    }

    /// Output directory for a language, named after its lower-cased identifier
    pub fn sdk_dir(&self, language: &str) -> PathBuf {
        self.root.join(output_dir_name(language))
    }

    pub fn manifest_path(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }

    pub fn lock_path(dir: &Path) -> PathBuf {
        dir.join(LOCK_FILE)
    }

    pub fn dependencies_dir(dir: &Path) -> PathBuf {
        dir.join(DEPENDENCIES_DIR)
    }
}
