//! Development host
//!
//! Serves an OpenAPI document from disk at `/openapi/v1.json`, mounts the
//! documentation UI and runs SDK generation in the background once the
//! listener is bound.

use crate::docs::{map_scalar_with_kiota, normalize_pattern};
use crate::environment::HostEnvironment;
use crate::middleware::timing_middleware;
use crate::service::{SdkGenerationService, ServerStarted};
use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use scalar_kiota_core::spec_source::SPEC_DOCUMENT_PATH;
use scalar_kiota_core::{GenerationOptions, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;

/// Development server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServerConfig {
    pub host: String,
    pub port: u16,
    /// OpenAPI document served at `/openapi/v1.json`
    pub spec_path: Option<PathBuf>,
    /// Route of the documentation page; the options' docs route when unset
    pub docs_pattern: Option<String>,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            spec_path: None,
            docs_pattern: None,
        }
    }
}

/// HTTP host with documentation routes and background SDK generation
pub struct DevServer {
    config: DevServerConfig,
    environment: HostEnvironment,
    options: GenerationOptions,
}

impl DevServer {
    pub fn new(
        config: DevServerConfig,
        environment: HostEnvironment,
        options: GenerationOptions,
    ) -> Self {
        // The page is opened where it is mounted
        let options = match &config.docs_pattern {
            Some(pattern) => options.with_docs_route_path(normalize_pattern(pattern)),
            None => options,
        };

        Self {
            config,
            environment,
            options,
        }
    }

    pub fn config(&self) -> &DevServerConfig {
        &self.config
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Route the documentation page is mounted at
    pub fn docs_pattern(&self) -> String {
        match &self.config.docs_pattern {
            Some(pattern) => normalize_pattern(pattern),
            None => normalize_pattern(self.options.docs_route()),
        }
    }

    /// Build the application router
    pub fn router(&self) -> Result<Router> {
        let mut app = Router::new();
        if let Some(spec_path) = &self.config.spec_path {
            app = app.route(
                SPEC_DOCUMENT_PATH,
                get(openapi_document).with_state(Arc::new(spec_path.clone())),
            );
        }

        let docs_pattern = self.docs_pattern();
        let app = map_scalar_with_kiota(app, &self.environment, &self.options, &docs_pattern)?;

        Ok(app
            .layer(middleware::from_fn(timing_middleware))
            .layer(TraceLayer::new_for_http()))
    }

    /// Bind, announce the bound address to the generation service and serve
    pub async fn start(self) -> Result<()> {
        let app = self.router()?;
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Starting Scalar Kiota host on {}", local_addr);

        let service =
            SdkGenerationService::with_defaults(self.environment.clone(), self.options.clone())?;
        let (started_tx, started_rx) = oneshot::channel();
        let _generation = service.on_start(started_rx);
        let _ = started_tx.send(ServerStarted {
            addresses: vec![base_url(local_addr)],
        });

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        service.on_stop();
        Ok(())
    }
}

/// Base URL clients use to reach `addr`
pub fn base_url(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("http://localhost:{}", addr.port())
    } else {
        format!("http://{}", addr)
    }
}

async fn openapi_document(State(path): State<Arc<PathBuf>>) -> Response {
    match tokio::fs::read_to_string(path.as_ref()).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read OpenAPI document");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
