//! Background generation service integration tests

mod common;

use common::{RecordingRunner, RecordingSpecSource};
use scalar_kiota_core::{CacheLayout, GenerationOptions, SdkGenerator};
use scalar_kiota_infra::init_test_logger;
use scalar_kiota_serve::{HostEnvironment, SdkGenerationService, ServerStarted};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;

const SPEC: &str = r#"{"openapi":"3.1.0","info":{"title":"Todos","version":"v1"},"paths":{}}"#;

fn service(
    environment: HostEnvironment,
    output: &TempDir,
    runner: Arc<RecordingRunner>,
    spec: Arc<RecordingSpecSource>,
) -> SdkGenerationService {
    let options = GenerationOptions::default()
        .with_languages(["Go"])
        .with_output_root(output.path());
    let layout = CacheLayout::new(output.path());
    let generator = SdkGenerator::new(options, layout, runner, spec);
    SdkGenerationService::new(environment, Arc::new(generator))
}

#[tokio::test]
async fn test_production_does_no_work() {
    let output = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::default());
    let spec = Arc::new(RecordingSpecSource::serving(SPEC));
    let service = service(
        HostEnvironment::production("TodoApi", output.path()),
        &output,
        runner.clone(),
        spec.clone(),
    );

    let (_started_tx, started_rx) = oneshot::channel();
    assert!(service.on_start(started_rx).is_none());
    assert!(spec.requested().is_empty());
    assert!(runner.lines().is_empty());
}

#[tokio::test]
async fn test_generation_waits_for_start_and_uses_first_address() {
    init_test_logger().unwrap();
    let output = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::default());
    let spec = Arc::new(RecordingSpecSource::serving(SPEC));
    let service = service(
        HostEnvironment::development("TodoApi", output.path()),
        &output,
        runner.clone(),
        spec.clone(),
    );

    let (started_tx, started_rx) = oneshot::channel();
    let handle = service.on_start(started_rx).unwrap();
    tokio::task::yield_now().await;
    assert!(spec.requested().is_empty());

    started_tx
        .send(ServerStarted {
            addresses: vec![
                "http://127.0.0.1:5123/".to_string(),
                "http://[::1]:5123".to_string(),
            ],
        })
        .unwrap();
    handle.await.unwrap();

    assert_eq!(spec.requested(), vec!["http://127.0.0.1:5123".to_string()]);
    assert!(runner
        .lines()
        .iter()
        .any(|line| line.starts_with("kiota generate") && line.contains("--language Go")));
    assert!(output.path().join(".spec.hash").exists());
    assert!(output.path().join("config.js").exists());
    service.on_stop();
}

#[tokio::test]
async fn test_default_server_url_when_nothing_bound() {
    let output = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::default());
    let spec = Arc::new(RecordingSpecSource::serving(SPEC));
    let service = service(
        HostEnvironment::development("TodoApi", output.path()),
        &output,
        runner,
        spec.clone(),
    );

    let (started_tx, started_rx) = oneshot::channel();
    let handle = service.on_start(started_rx).unwrap();
    started_tx.send(ServerStarted { addresses: vec![] }).unwrap();
    handle.await.unwrap();

    assert_eq!(spec.requested(), vec!["http://localhost:5000".to_string()]);
}

#[tokio::test]
async fn test_generation_failure_does_not_reach_host() {
    let output = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::default());
    let spec = Arc::new(RecordingSpecSource::unreachable());
    let service = service(
        HostEnvironment::development("TodoApi", output.path()),
        &output,
        runner.clone(),
        spec,
    );

    let (started_tx, started_rx) = oneshot::channel();
    let handle = service.on_start(started_rx).unwrap();
    started_tx.send(ServerStarted { addresses: vec![] }).unwrap();

    assert!(handle.await.is_ok());
    assert!(runner.lines().is_empty());
    assert!(!output.path().join(".spec.hash").exists());
}

#[tokio::test]
async fn test_host_that_never_starts_skips_generation() {
    let output = TempDir::new().unwrap();
    let runner = Arc::new(RecordingRunner::default());
    let spec = Arc::new(RecordingSpecSource::serving(SPEC));
    let service = service(
        HostEnvironment::development("TodoApi", output.path()),
        &output,
        runner,
        spec.clone(),
    );

    let (started_tx, started_rx) = oneshot::channel::<ServerStarted>();
    let handle = service.on_start(started_rx).unwrap();
    drop(started_tx);
    handle.await.unwrap();

    assert!(spec.requested().is_empty());
}
