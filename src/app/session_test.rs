use super::*;
use crate::capture::host::tests::{FakeExporter, FakeProvider};
use crate::capture::synthetic::{SyntheticCameraProvider, SyntheticEncoder};
use crate::capture::{AcquireError, CapturePipeline, MediaSourceProvider};
use crate::events::tests::MockEventEmitter;
use crate::studio::{spawn, Studio};
use std::sync::Arc;

fn spawn_synthetic(
    provider: Arc<dyn MediaSourceProvider>,
    exporter: Arc<FakeExporter>,
    settings: &Settings,
) -> (StudioHandle, tokio::task::JoinHandle<()>) {
    let studio = Studio::new(
        settings.prompter.clone(),
        settings.studio.clone(),
        CapturePipeline::new(
            provider,
            Arc::new(SyntheticEncoder::new(Duration::from_millis(250))),
            exporter,
        ),
        MockEventEmitter::new(),
    );
    spawn(studio)
}

#[test]
fn test_duration_scales_with_script_length() {
    let mut settings = Settings::default();
    settings.prompter.script = "one line".to_string();
    let short = recording_duration(&settings, Duration::from_secs(600));

    settings.prompter.script = "line\n".repeat(50);
    let long = recording_duration(&settings, Duration::from_secs(600));

    assert!(short > Duration::ZERO);
    assert!(long > short);
}

#[test]
fn test_duration_is_capped() {
    let mut settings = Settings::default();
    settings.prompter.script = "line\n".repeat(500);
    let cap = Duration::from_secs(5);
    assert_eq!(recording_duration(&settings, cap), cap);

    settings.prompter.speed = 0.0;
    assert_eq!(recording_duration(&Settings::default(), cap), cap);
    assert_eq!(recording_duration(&settings, cap), cap);
}

#[test]
fn test_faster_scroll_records_shorter() {
    let mut settings = Settings::default();
    let normal = recording_duration(&settings, Duration::from_secs(600));
    settings.prompter.speed = 4.0;
    let fast = recording_duration(&settings, Duration::from_secs(600));
    assert!(fast < normal);
}

#[tokio::test(start_paused = true)]
async fn test_dry_run_saves_a_take() {
    let settings = Settings::default();
    let exporter = Arc::new(FakeExporter::default());
    let (handle, task) = spawn_synthetic(Arc::new(SyntheticCameraProvider), exporter.clone(), &settings);

    let report = dry_run(&handle, &settings, Duration::from_secs(2))
        .await
        .unwrap()
        .expect("a take was saved");

    assert_eq!(report.saved_to, PathBuf::from("/downloads/my-video.webm"));
    assert!(report.artifact.chunk_count >= 8);
    assert_eq!(exporter.saved.lock().unwrap().len(), 1);
    assert_eq!(handle.status(), SessionStatus::Idle);

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_dry_run_retries_acquisition() {
    let settings = Settings::default();
    let provider = Arc::new(FakeProvider::failing(vec![
        AcquireError::NoDevice,
        AcquireError::PermissionDenied,
    ]));
    let exporter = Arc::new(FakeExporter::default());
    let (handle, _task) = spawn_synthetic(provider.clone(), exporter, &settings);

    acquire_with_retry(&handle).await.unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.has_source);
    assert_eq!(snapshot.failed_attempts, 2);
}

#[tokio::test(start_paused = true)]
async fn test_dry_run_without_camera_saves_nothing() {
    let settings = Settings::default();
    let provider = Arc::new(FakeProvider::failing(vec![
        AcquireError::PermissionDenied,
        AcquireError::PermissionDenied,
        AcquireError::PermissionDenied,
    ]));
    let exporter = Arc::new(FakeExporter::default());
    let (handle, _task) = spawn_synthetic(provider, exporter.clone(), &settings);

    let report = dry_run(&handle, &settings, Duration::from_secs(1))
        .await
        .unwrap();

    assert!(report.is_none());
    assert!(exporter.saved.lock().unwrap().is_empty());
    assert_eq!(handle.status(), SessionStatus::Idle);
}
