//! Export command implementation
//!
//! This module wires the parsed command line, the loaded configuration and a
//! rendering environment launcher into one export run, and maps its outcome
//! onto the process exit code.

use crate::adapters::browser::{ChromiumLauncher, EnvironmentLauncher};
use crate::cli::Cli;
use crate::config::{BatchConfig, ExportOptions, RendererConfig};
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::core::index::load_document;
use crate::core::output::OutputResolver;
use crate::core::session::SessionOptions;
use crate::domain::BatchError;
use std::sync::Arc;
use tokio::sync::watch;

/// Every selected page was exported
pub const EXIT_SUCCESS: i32 = 0;

/// A run-level error, an invalid option, or at least one failed page
pub const EXIT_FAILURE: i32 = 1;

/// Stopped by SIGINT or SIGTERM
pub const EXIT_INTERRUPTED: i32 = 130;

/// Execute the export command with headless Chromium
pub async fn execute(
    cli: &Cli,
    config: BatchConfig,
    shutdown_signal: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    execute_with_launcher(
        cli,
        config,
        shutdown_signal,
        |renderer: &RendererConfig| -> Arc<dyn EnvironmentLauncher> {
            Arc::new(ChromiumLauncher::new(renderer.clone()))
        },
    )
    .await
}

/// Execute the export command with a caller-supplied launcher
///
/// `make_launcher` is only called once every option has been validated and
/// the document has been loaded, so invalid input never starts an
/// environment.
pub async fn execute_with_launcher<F>(
    cli: &Cli,
    mut config: BatchConfig,
    shutdown_signal: watch::Receiver<bool>,
    make_launcher: F,
) -> anyhow::Result<i32>
where
    F: FnOnce(&RendererConfig) -> Arc<dyn EnvironmentLauncher>,
{
    tracing::info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        "Starting export command"
    );

    if let Err(e) = cli.apply_overrides(&mut config) {
        return Ok(report_error(&e));
    }

    let options = match ExportOptions::from_config(&config.export) {
        Ok(options) => options,
        Err(e) => return Ok(report_error(&e)),
    };

    let session_options = match SessionOptions::from_config(&config.renderer) {
        Ok(session_options) => session_options,
        Err(e) => return Ok(report_error(&e)),
    };

    let document = match load_document(&cli.input).await {
        Ok(document) => document,
        Err(e) => return Ok(report_error(&e)),
    };

    let launcher = make_launcher(&config.renderer);
    let coordinator =
        ExportCoordinator::new(launcher, session_options).with_shutdown(shutdown_signal);
    let output = OutputResolver::new(&cli.output);

    let summary = match coordinator.run(&document, &options, &output).await {
        Ok(summary) => summary,
        Err(BatchError::Interrupted) => {
            tracing::info!("Export interrupted by user signal");
            return Ok(EXIT_INTERRUPTED);
        }
        Err(e) => return Ok(report_error(&e)),
    };

    print_summary(&summary);
    Ok(exit_code(&summary))
}

/// Maps a finished run onto the process exit code
pub fn exit_code(summary: &ExportSummary) -> i32 {
    if summary.interrupted {
        EXIT_INTERRUPTED
    } else if summary.is_successful() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

fn report_error(error: &BatchError) -> i32 {
    tracing::error!(error = %error, "Export failed");
    eprintln!("Error: {error}");
    EXIT_FAILURE
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("Export Summary:");
    println!("  Pages in document: {}", summary.total_pages);
    println!("  Selected: {}", summary.selected_pages);
    println!("  Exported: {}", summary.successful_pages());
    println!("  Failed: {}", summary.failed_pages());
    if summary.skipped_pages > 0 {
        println!("  Skipped: {}", summary.skipped_pages);
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

    if !summary.failures.is_empty() {
        println!();
        println!("Failed pages:");
        for failure in &summary.failures {
            println!("  - {}: {}", failure.page, failure.message);
        }
    }

    if summary.interrupted {
        println!();
        println!("Export interrupted; pages already written were kept.");
    }
}
