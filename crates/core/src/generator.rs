//! SDK generation cache and orchestration
//!
//! One run walks a fixed, strictly sequential pipeline:
//!
//! ```text
//! Idle -> Downloading -> Hashing -> CacheCheck -+-> UpToDate
//!                                               |
//!                                               +-> Regenerating -> InstallingTool
//!                                                   -> Generating (per language)
//!                                                   -> WritingConfig -> Done
//! ```
//!
//! followed by an optional `OpeningDocs` step. Every failure aborts the run
//! and is returned to the caller; nothing is retried.
//!
//! The spec and its fingerprint are persisted *before* generation starts.
//! If a run dies half way, the fingerprint on disk already matches the next
//! download, so the cache check must still reject the cache because the
//! per-language artifacts are missing. [`SdkGenerator::is_cache_valid`]
//! therefore probes every artifact and never trusts the fingerprint alone.

use crate::bundler::Bundler;
use crate::config::GenerationOptions;
use crate::hash::{compute_hash, is_valid_fingerprint};
use crate::installer::DependencyInstaller;
use crate::language::is_bundling_eligible;
use crate::layout::CacheLayout;
use crate::loader_config::ensure_loader_config;
use crate::manifest::ensure_manifest;
use crate::process::{args, probe_tool, ProcessRunner, ToolProbe};
use crate::spec_source::SpecSource;
use crate::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// Code generator executable
pub const GENERATOR_TOOL: &str = "kiota";

/// Package manager used to install the code generator
pub const TOOL_INSTALLER: &str = "dotnet";

/// Package id of the code generator
pub const GENERATOR_PACKAGE: &str = "Microsoft.OpenApi.Kiota";

/// Stages of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Idle,
    Downloading,
    Hashing,
    CacheCheck,
    UpToDate,
    Regenerating,
    InstallingTool,
    Generating,
    WritingConfig,
    OpeningDocs,
    Done,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Downloading => "downloading",
            Self::Hashing => "hashing",
            Self::CacheCheck => "cache_check",
            Self::UpToDate => "up_to_date",
            Self::Regenerating => "regenerating",
            Self::InstallingTool => "installing_tool",
            Self::Generating => "generating",
            Self::WritingConfig => "writing_config",
            Self::OpeningDocs => "opening_docs",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Fingerprint and artifacts matched; nothing was written
    UpToDate,
    /// SDKs were regenerated for these languages, in order
    Regenerated { languages: Vec<String> },
}

/// Downloads the host's spec and regenerates SDKs when it changed
pub struct SdkGenerator {
    options: GenerationOptions,
    layout: CacheLayout,
    runner: Arc<dyn ProcessRunner>,
    spec_source: Arc<dyn SpecSource>,
}

impl fmt::Debug for SdkGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkGenerator")
            .field("options", &self.options)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl SdkGenerator {
    pub fn new(
        options: GenerationOptions,
        layout: CacheLayout,
        runner: Arc<dyn ProcessRunner>,
        spec_source: Arc<dyn SpecSource>,
    ) -> Self {
        Self {
            options,
            layout,
            runner,
            spec_source,
        }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    /// Run the pipeline against the host at `server_url`
    pub async fn run(&self, server_url: &str) -> Result<GenerationOutcome> {
        let outcome = self.generate_if_needed(server_url).await?;

        if self.options.open_docs_on_start {
            self.enter(GenerationStage::OpeningDocs);
            self.open_docs(server_url);
        }

        self.enter(GenerationStage::Done);
        Ok(outcome)
    }

    /// Regenerate every configured SDK if the spec or an artifact changed
    pub async fn generate_if_needed(&self, server_url: &str) -> Result<GenerationOutcome> {
        self.enter(GenerationStage::Downloading);
        let spec = self.spec_source.fetch(server_url).await?;

        self.enter(GenerationStage::Hashing);
        let current_hash = compute_hash(&spec);

        self.enter(GenerationStage::CacheCheck);
        if self.is_cache_valid(&current_hash).await? {
            self.enter(GenerationStage::UpToDate);
            info!("SDKs are up-to-date");
            return Ok(GenerationOutcome::UpToDate);
        }

        self.enter(GenerationStage::Regenerating);
        fs::create_dir_all(self.layout.root()).await?;
        fs::write(self.layout.spec_path(), &spec).await?;
        fs::write(self.layout.hash_path(), &current_hash).await?;

        self.enter(GenerationStage::InstallingTool);
        self.ensure_tool_installed().await?;

        self.enter(GenerationStage::Generating);
        for language in &self.options.languages {
            self.generate_language(language).await?;
        }

        self.enter(GenerationStage::WritingConfig);
        ensure_loader_config(&self.layout.config_path(), &self.options.sdk_name).await?;

        info!(languages = ?self.options.languages, "SDK generation completed");
        Ok(GenerationOutcome::Regenerated {
            languages: self.options.languages.clone(),
        })
    }

    /// Whether the cache matches `current_hash` and every artifact exists
    pub async fn is_cache_valid(&self, current_hash: &str) -> Result<bool> {
        let hash_path = self.layout.hash_path();
        if !fs::try_exists(&hash_path).await? || !fs::try_exists(self.layout.config_path()).await?
        {
            debug!("Cache miss: fingerprint or loader config missing");
            return Ok(false);
        }

        let cached_hash = fs::read(&hash_path).await?;
        if cached_hash != current_hash.as_bytes() {
            debug!(
                well_formed = is_valid_fingerprint(&String::from_utf8_lossy(&cached_hash)),
                "Cache miss: OpenAPI document changed"
            );
            return Ok(false);
        }

        for language in &self.options.languages {
            if !self.artifact_present(language).await? {
                debug!(language = %language, "Cache miss: SDK artifact missing");
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Make sure the code generator can be run, installing it if not
    pub async fn ensure_tool_installed(&self) -> Result<ToolProbe> {
        let probe = probe_tool(self.runner.as_ref(), GENERATOR_TOOL).await?;

        match &probe {
            ToolProbe::Available => debug!(tool = GENERATOR_TOOL, "Code generator available"),
            ToolProbe::Missing(reason) => {
                warn!(tool = GENERATOR_TOOL, reason = %reason, "Installing Kiota CLI...");
                self.runner
                    .run(
                        TOOL_INSTALLER,
                        &args(["tool", "install", "-g", GENERATOR_PACKAGE]),
                        None,
                    )
                    .await?;
            }
        }

        Ok(probe)
    }

    /// Generate the SDK for one language, bundling it when eligible
    pub async fn generate_language(&self, language: &str) -> Result<PathBuf> {
        let output_dir = self.layout.sdk_dir(language);
        info!(language = %language, dir = %output_dir.display(), "Generating SDK");

        let generator_args = generator_args(
            &self.layout.spec_path(),
            language,
            &self.options.sdk_name,
            &output_dir,
        );
        self.runner
            .run(GENERATOR_TOOL, &generator_args, None)
            .await?;

        if is_bundling_eligible(language) && self.options.bundle_generated_script {
            self.bundle_typescript(&output_dir).await?;
        }

        Ok(output_dir)
    }

    /// URL of the documentation page on `server_url`
    pub fn docs_url(&self, server_url: &str) -> String {
        format!(
            "{}/{}",
            server_url.trim_end_matches('/'),
            self.options.docs_route()
        )
    }

    fn open_docs(&self, server_url: &str) {
        let url = self.docs_url(server_url);
        info!(url = %url, "Opening API documentation");
        self.runner.open_url(&url);
    }

    async fn bundle_typescript(&self, dir: &Path) -> Result<()> {
        ensure_manifest(dir, &self.options.sdk_name).await?;
        DependencyInstaller::new(self.runner.as_ref())
            .ensure_dependencies(dir)
            .await?;
        Bundler::new(self.runner.as_ref())
            .bundle(dir, &self.layout.bundle_path())
            .await?;
        Ok(())
    }

    async fn artifact_present(&self, language: &str) -> Result<bool> {
        if is_bundling_eligible(language) && self.options.bundle_generated_script {
            return Ok(fs::try_exists(self.layout.bundle_path()).await?);
        }
        contains_files(&self.layout.sdk_dir(language)).await
    }

    fn enter(&self, stage: GenerationStage) {
        info!(stage = %stage, "SDK generation stage");
    }
}

/// Generator argument list for one language
pub fn generator_args(
    spec_path: &Path,
    language: &str,
    sdk_name: &str,
    output_dir: &Path,
) -> Vec<String> {
    vec![
        "generate".to_string(),
        "--openapi".to_string(),
        spec_path.display().to_string(),
        "--language".to_string(),
        language.to_string(),
        "--class-name".to_string(),
        sdk_name.to_string(),
        "--namespace-name".to_string(),
        sdk_name.to_string(),
        "--output".to_string(),
        output_dir.display().to_string(),
        "--clean-output".to_string(),
        "--exclude-backward-compatible".to_string(),
    ]
}

/// Whether `dir` exists and holds at least one file at any depth
async fn contains_files(dir: &Path) -> Result<bool> {
    if !fs::try_exists(dir).await? {
        return Ok(false);
    }

    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let mut entries = fs::read_dir(&current).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(entry.path());
            } else {
                return Ok(true);
            }
        }
    }

    Ok(false)
}
