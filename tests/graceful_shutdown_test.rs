//! Integration tests for graceful shutdown functionality
//!
//! These tests verify that:
//! - A shutdown signal stops scheduling further pages
//! - An in-flight render is abandoned
//! - The rendering environment is closed on interruption
//! - Pages written before the signal are kept

mod common;

use common::{document, session_options, Behavior, Call, MockLauncher};
use drawio_batch::cli::commands::export::{exit_code, EXIT_INTERRUPTED};
use drawio_batch::config::{ExportOptions, FailurePolicy};
use drawio_batch::core::export::ExportCoordinator;
use drawio_batch::core::output::OutputResolver;
use drawio_batch::domain::ExportFormat;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;

fn png_all() -> ExportOptions {
    ExportOptions::new(ExportFormat::Png, 75, 1.0, -1, FailurePolicy::Continue).unwrap()
}

#[tokio::test]
async fn test_shutdown_before_first_page() {
    let temp_dir = TempDir::new().unwrap();
    let launcher = MockLauncher::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown_tx.send(true).unwrap();

    let summary = ExportCoordinator::new(launcher.shared(), session_options(Duration::from_secs(5)))
        .with_shutdown(shutdown_rx)
        .run(&document(&["A", "B"]), &png_all(), &OutputResolver::new(temp_dir.path()))
        .await
        .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.skipped_pages, 2);
    assert!(launcher.rendered_pages().is_empty());
    assert_eq!(launcher.closes(), 1);
    assert_eq!(exit_code(&summary), EXIT_INTERRUPTED);
}

#[tokio::test]
async fn test_shutdown_abandons_in_flight_render() {
    let temp_dir = TempDir::new().unwrap();
    let launcher = MockLauncher::new().with_page(1, Behavior::Hang);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = shutdown_tx.send(true);
    });

    let summary = ExportCoordinator::new(launcher.shared(), session_options(Duration::from_secs(30)))
        .with_shutdown(shutdown_rx)
        .run(
            &document(&["A", "B", "C"]),
            &png_all(),
            &OutputResolver::new(temp_dir.path()),
        )
        .await
        .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.successful_pages(), 1);
    assert_eq!(summary.skipped_pages, 2);
    assert!(summary.failures.is_empty());
    assert_eq!(launcher.rendered_pages(), vec![0, 1]);
    assert_eq!(launcher.calls().last(), Some(&Call::Close));
    assert!(temp_dir.path().join("A.png").is_file());
    assert!(!temp_dir.path().join("C.png").exists());
}

#[tokio::test]
async fn test_dropped_sender_does_not_interrupt() {
    let temp_dir = TempDir::new().unwrap();
    let launcher = MockLauncher::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    drop(shutdown_tx);

    let summary = ExportCoordinator::new(launcher.shared(), session_options(Duration::from_secs(5)))
        .with_shutdown(shutdown_rx)
        .run(&document(&["A", "B"]), &png_all(), &OutputResolver::new(temp_dir.path()))
        .await
        .unwrap();

    assert!(!summary.interrupted);
    assert!(summary.is_successful());
    assert_eq!(launcher.rendered_pages(), vec![0, 1]);
}
