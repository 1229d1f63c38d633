//! Package manifest for the generated TypeScript SDK
//!
//! The manifest is rebuilt from the SDK name and a pinned dependency table on
//! every generation. It is only written when its text differs from what is
//! already on disk: the dependency installer compares the manifest's
//! modification time against the lock file, so rewriting identical content
//! would force a needless reinstall.

use crate::layout::CacheLayout;
use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Version range shared by the runtime-support packages
const KIOTA_RUNTIME_VERSION: &str = "^1.0.0-preview.96";

/// Runtime-support packages the generated client imports
pub const RUNTIME_DEPENDENCIES: [&str; 6] = [
    "@microsoft/kiota-abstractions",
    "@microsoft/kiota-http-fetchlibrary",
    "@microsoft/kiota-serialization-json",
    "@microsoft/kiota-serialization-text",
    "@microsoft/kiota-serialization-form",
    "@microsoft/kiota-serialization-multipart",
];

/// `package.json` contents, serialized in field declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub private: bool,
    pub dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    /// Manifest for an SDK called `sdk_name`
    pub fn for_sdk(sdk_name: &str) -> Self {
        let dependencies = RUNTIME_DEPENDENCIES
            .iter()
            .map(|package| (package.to_string(), KIOTA_RUNTIME_VERSION.to_string()))
            .collect();

        Self {
            name: package_name(sdk_name),
            version: "1.0.0".to_string(),
            module_type: "module".to_string(),
            private: true,
            dependencies,
        }
    }

    /// Serialized manifest text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Package name derived from the SDK name: lower-cased, spaces as hyphens
pub fn package_name(sdk_name: &str) -> String {
    sdk_name.to_lowercase().replace(' ', "-")
}

/// Whether [`ensure_manifest`] touched the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestWrite {
    Written,
    Unchanged,
}

/// Make sure `dir/package.json` holds the manifest for `sdk_name`
pub async fn ensure_manifest(dir: &Path, sdk_name: &str) -> Result<ManifestWrite> {
    let path = CacheLayout::manifest_path(dir);
    let json = PackageManifest::for_sdk(sdk_name).to_json()?;

    if fs::try_exists(&path).await? && fs::read_to_string(&path).await? == json {
        tracing::debug!(path = %path.display(), "Package manifest unchanged");
        return Ok(ManifestWrite::Unchanged);
    }

    fs::create_dir_all(dir).await?;
    fs::write(&path, json).await?;
    tracing::debug!(path = %path.display(), "Package manifest written");
    Ok(ManifestWrite::Written)
}
