//! Middleware for the development host

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;

/// Timing middleware to log request duration
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Location the site root is redirected to
#[derive(Debug, Clone)]
pub struct RootRedirect {
    target: Arc<str>,
}

impl RootRedirect {
    pub fn new(target: &str) -> Self {
        Self {
            target: Arc::from(target),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Redirect `/` to the documentation page with `302 Found`
///
/// Every other path passes through untouched.
pub async fn redirect_root(
    State(redirect): State<RootRedirect>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path() != "/" {
        return next.run(request).await;
    }

    match HeaderValue::from_str(redirect.target()) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            tracing::warn!(target_path = redirect.target(), error = %e, "Invalid redirect target");
            next.run(request).await
        }
    }
}
