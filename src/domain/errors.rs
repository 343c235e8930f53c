//! Domain error types
//!
//! This module defines the error hierarchy for drawio-batch. Every failure the
//! export pipeline can report maps onto one [`BatchError`] variant, and no
//! variant exposes a third-party type directly.

use std::time::Duration;
use thiserror::Error;

/// Main drawio-batch error type
#[derive(Debug, Error)]
pub enum BatchError {
    /// A CLI option or configuration value is out of range
    #[error("Invalid configuration: {0}")]
    ConfigValidation(String),

    /// The input is not well-formed markup or has no page container
    #[error("Invalid document: {0}")]
    DocumentFormat(String),

    /// The rendering environment could not be started
    #[error("Failed to launch rendering environment: {0}")]
    EnvironmentLaunch(String),

    /// The rendering harness did not call back in time
    #[error("Rendering page {page} timed out after {}s", .timeout.as_secs_f64())]
    RenderTimeout {
        /// Index of the page being rendered
        page: usize,
        /// Timeout that elapsed
        timeout: Duration,
    },

    /// The rendering harness failed or returned an unusable result
    #[error("Rendering failed: {0}")]
    RenderFailure(String),

    /// Capturing or writing an artifact failed
    #[error("Capture failed: {0}")]
    Capture(String),

    /// I/O errors outside artifact capture (input file, output folder)
    #[error("I/O error: {0}")]
    Io(String),

    /// A shutdown signal arrived while the export was running
    #[error("Export interrupted")]
    Interrupted,
}

impl BatchError {
    /// Whether the error belongs to a single page rather than the whole run
    pub fn is_page_scoped(&self) -> bool {
        matches!(
            self,
            BatchError::RenderTimeout { .. } | BatchError::RenderFailure(_) | BatchError::Capture(_)
        )
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        BatchError::Io(err.to_string())
    }
}

impl From<quick_xml::Error> for BatchError {
    fn from(err: quick_xml::Error) -> Self {
        BatchError::DocumentFormat(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for BatchError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        BatchError::DocumentFormat(format!("malformed attribute: {err}"))
    }
}

impl From<serde_json::Error> for BatchError {
    fn from(err: serde_json::Error) -> Self {
        BatchError::RenderFailure(format!("unexpected harness payload: {err}"))
    }
}

impl From<toml::de::Error> for BatchError {
    fn from(err: toml::de::Error) -> Self {
        BatchError::ConfigValidation(format!("TOML parse error: {err}"))
    }
}
