//! Documentation route integration tests
//!
//! Exercises the router returned by `map_scalar_with_kiota` in both
//! development and production environments.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    routing::get,
    Router,
};
use scalar_kiota_core::{GenerationOptions, Theme};
use scalar_kiota_serve::{map_scalar_with_kiota, HostEnvironment};
use tempfile::TempDir;
use tower::ServiceExt;

fn host_routes() -> Router {
    Router::new().route("/todos", get(|| async { "[]" }))
}

async fn get_path(app: &Router, path: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8_lossy(&body).to_string())
}

fn development_app(output: &TempDir, pattern: &str) -> Router {
    let environment = HostEnvironment::development("TodoApi", output.path());
    let options = GenerationOptions::default()
        .with_theme(Theme::Moon)
        .with_output_root(output.path());
    map_scalar_with_kiota(host_routes(), &environment, &options, pattern).unwrap()
}

#[tokio::test]
async fn test_root_redirects_to_docs() {
    let output = TempDir::new().unwrap();
    let app = development_app(&output, "/api");

    let (status, location, _) = get_path(&app, "/").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/api"));
}

#[tokio::test]
async fn test_root_redirect_follows_custom_pattern() {
    let output = TempDir::new().unwrap();
    let app = development_app(&output, "/reference/");

    let (status, location, _) = get_path(&app, "/").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/reference"));

    let (status, _, _) = get_path(&app, "/reference").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_docs_page_is_rendered() {
    let output = TempDir::new().unwrap();
    let app = development_app(&output, "/api");

    let (status, _, body) = get_path(&app, "/api").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>TodoApi API</title>"));
    assert!(body.contains(r#""theme":"moon""#));
    assert!(body.contains("/openapi/v1.json"));
    assert!(body.contains("/.scalar-kiota/config.js"));
}

#[tokio::test]
async fn test_configured_title_wins() {
    let output = TempDir::new().unwrap();
    let environment = HostEnvironment::development("TodoApi", output.path());
    let options = GenerationOptions::default()
        .with_title(Some("Todo Reference"))
        .with_output_root(output.path());
    let app = map_scalar_with_kiota(host_routes(), &environment, &options, "/api").unwrap();

    let (_, _, body) = get_path(&app, "/api").await;
    assert!(body.contains("<title>Todo Reference</title>"));
}

#[tokio::test]
async fn test_sdk_files_are_served() {
    let output = TempDir::new().unwrap();
    std::fs::write(output.path().join("config.js"), "export default {};").unwrap();
    std::fs::write(output.path().join("sdk.js"), "export const x = 1;").unwrap();
    let app = development_app(&output, "/api");

    let (status, _, body) = get_path(&app, "/.scalar-kiota/config.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "export default {};");

    let (status, _, body) = get_path(&app, "/.scalar-kiota/sdk.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "export const x = 1;");

    let (status, _, _) = get_path(&app, "/.scalar-kiota/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_host_routes_and_unmapped_paths() {
    let output = TempDir::new().unwrap();
    let app = development_app(&output, "/api");

    let (status, _, body) = get_path(&app, "/todos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");

    let (status, location, _) = get_path(&app, "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(location.is_none());
}

#[tokio::test]
async fn test_production_maps_nothing() {
    let output = TempDir::new().unwrap();
    std::fs::write(output.path().join("config.js"), "export default {};").unwrap();
    let environment = HostEnvironment::production("TodoApi", output.path());
    let options = GenerationOptions::default().with_output_root(output.path());
    let app = map_scalar_with_kiota(host_routes(), &environment, &options, "/api").unwrap();

    let (status, location, _) = get_path(&app, "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(location.is_none());

    let (status, _, _) = get_path(&app, "/api").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = get_path(&app, "/.scalar-kiota/config.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = get_path(&app, "/todos").await;
    assert_eq!(status, StatusCode::OK);
}
