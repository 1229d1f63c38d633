//! Background SDK generation service
//!
//! The service is started with a one-shot "server started" signal. In
//! development it spawns a task that waits for that signal, runs the
//! generator once against the addresses the server bound, and logs the
//! result. Generation failures are logged and never reach the host.

use crate::environment::HostEnvironment;
use scalar_kiota_core::{
    resolve_server_url, CacheLayout, GenerationOptions, GenerationOutcome, HttpSpecSource,
    Result, SdkGenerator,
};
use scalar_kiota_infra::SystemProcessRunner;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Timeout for downloading the OpenAPI document
pub const SPEC_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Sent once the host is accepting connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStarted {
    /// Bound base URLs, e.g. `http://127.0.0.1:5000`
    pub addresses: Vec<String>,
}

/// Runs SDK generation once the host has started
#[derive(Debug)]
pub struct SdkGenerationService {
    environment: HostEnvironment,
    generator: Arc<SdkGenerator>,
}

impl SdkGenerationService {
    pub fn new(environment: HostEnvironment, generator: Arc<SdkGenerator>) -> Self {
        Self {
            environment,
            generator,
        }
    }

    /// Service wired to the OS process runner and an HTTP spec source
    pub fn with_defaults(environment: HostEnvironment, options: GenerationOptions) -> Result<Self> {
        let layout = CacheLayout::new(options.resolve_output_root(&environment.web_root()));
        let generator = SdkGenerator::new(
            options,
            layout,
            Arc::new(SystemProcessRunner::new()),
            Arc::new(HttpSpecSource::new(SPEC_FETCH_TIMEOUT)?),
        );
        Ok(Self::new(environment, Arc::new(generator)))
    }

    pub fn generator(&self) -> &SdkGenerator {
        &self.generator
    }

    /// Start the service; returns the generation task in development
    pub fn on_start(&self, started: oneshot::Receiver<ServerStarted>) -> Option<JoinHandle<()>> {
        if !self.environment.is_development() {
            debug!(environment = %self.environment.name, "SDK generation disabled");
            return None;
        }

        let generator = Arc::clone(&self.generator);
        Some(tokio::spawn(async move {
            let Ok(started) = started.await else {
                warn!("Host stopped before it started; skipping SDK generation");
                return;
            };

            let server_url = resolve_server_url(&started.addresses);
            info!(server_url = %server_url, "Starting SDK generation");

            match generator.run(&server_url).await {
                Ok(GenerationOutcome::UpToDate) => debug!("SDK generation skipped, cache valid"),
                Ok(GenerationOutcome::Regenerated { languages }) => {
                    info!(languages = ?languages, "SDKs regenerated")
                }
                Err(e) => error!(
                    error = %e,
                    category = %e.category(),
                    "SDK generation failed"
                ),
            }
        }))
    }

    /// Stop the service; a running generation is left to finish on its own
    pub fn on_stop(&self) {
        debug!("SDK generation service stopped");
    }
}
