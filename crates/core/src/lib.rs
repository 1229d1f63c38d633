//! Scalar Kiota Core Library
//!
//! Core functionality for generating client SDKs from a running host's
//! OpenAPI document. This library downloads and fingerprints the document,
//! decides whether the cached SDKs are still valid, drives the external
//! code generator, and bundles the TypeScript SDK for the browser.

pub mod bundler;
pub mod config;
pub mod error;
pub mod generator;
pub mod hash;
pub mod installer;
pub mod language;
pub mod layout;
pub mod loader_config;
pub mod manifest;
pub mod process;
pub mod spec_source;

// Re-export commonly used types
pub use bundler::{find_entry_point, Bundler};
pub use config::{GenerationOptions, Theme};
pub use error::{ErrorCategory, Result, ScalarKiotaError};
pub use generator::{GenerationOutcome, GenerationStage, SdkGenerator};
pub use hash::compute_hash;
pub use installer::{DependencyInstaller, InstallAction};
pub use language::{is_bundling_eligible, output_dir_name};
pub use layout::CacheLayout;
pub use loader_config::ensure_loader_config;
pub use manifest::{ensure_manifest, ManifestWrite, PackageManifest};
pub use process::{probe_tool, ProcessRunner, ToolProbe};
pub use spec_source::{resolve_server_url, HttpSpecSource, SpecSource};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert!(info.contains(NAME));
        assert!(info.contains(VERSION));
    }
}
