//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Human-readable console output on stderr
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use drawio_batch::logging::init_logging;
//! use drawio_batch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a page written to disk
///
/// # Example
///
/// ```no_run
/// use drawio_batch::log_page_exported;
/// use drawio_batch::domain::{Artifact, ExportFormat, Page};
/// use std::path::PathBuf;
///
/// let artifact = Artifact {
///     page: Page::new(0, "Page-1"),
///     format: ExportFormat::Png,
///     path: PathBuf::from("out/Page-1.png"),
///     bytes: 2048,
/// };
/// log_page_exported!(&artifact);
/// ```
#[macro_export]
macro_rules! log_page_exported {
    ($artifact:expr) => {
        tracing::info!(
            page = $artifact.page.index,
            name = %$artifact.page.name,
            format = %$artifact.format,
            path = %$artifact.path.display(),
            bytes = $artifact.bytes,
            "Page exported"
        );
    };
}

/// Log a page that could not be exported
///
/// # Example
///
/// ```no_run
/// use drawio_batch::log_page_failed;
/// use drawio_batch::domain::{BatchError, Page};
///
/// let page = Page::new(2, "Flow");
/// let error = BatchError::RenderFailure("harness threw".to_string());
/// log_page_failed!(&page, &error);
/// ```
#[macro_export]
macro_rules! log_page_failed {
    ($page:expr, $error:expr) => {
        tracing::error!(
            page = $page.index,
            name = %$page.name,
            error = %$error,
            "Page export failed"
        );
    };
}
