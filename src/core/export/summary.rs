//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{Artifact, BatchError, Page};
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of pages in the document
    pub total_pages: usize,

    /// Number of pages the selection matched
    pub selected_pages: usize,

    /// Artifacts written, in export order
    pub exported: Vec<Artifact>,

    /// Pages that failed
    pub failures: Vec<PageFailure>,

    /// Selected pages never attempted (fail-fast or interruption)
    pub skipped_pages: usize,

    /// Whether a shutdown signal stopped the run
    pub interrupted: bool,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(total_pages: usize, selected_pages: usize) -> Self {
        Self {
            total_pages,
            selected_pages,
            ..Self::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a written artifact
    pub fn add_artifact(&mut self, artifact: Artifact) {
        self.exported.push(artifact);
    }

    /// Record a failed page
    pub fn add_failure(&mut self, failure: PageFailure) {
        self.failures.push(failure);
    }

    /// Number of pages written
    pub fn successful_pages(&self) -> usize {
        self.exported.len()
    }

    /// Number of pages that failed
    pub fn failed_pages(&self) -> usize {
        self.failures.len()
    }

    /// Check if every selected page was written
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty() && !self.interrupted && self.skipped_pages == 0
    }

    /// Get success rate as a percentage of selected pages
    pub fn success_rate(&self) -> f64 {
        if self.selected_pages == 0 {
            return 100.0;
        }
        (self.exported.len() as f64 / self.selected_pages as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_pages = self.total_pages,
            selected_pages = self.selected_pages,
            successful = self.successful_pages(),
            failed = self.failed_pages(),
            skipped = self.skipped_pages,
            interrupted = self.interrupted,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        for failure in &self.failures {
            tracing::warn!(
                page_index = failure.page.index,
                page_name = %failure.page.name,
                kind = ?failure.kind,
                message = %failure.message,
                "Page failed"
            );
        }
    }
}

/// Category of a page failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The harness did not call back in time
    Timeout,
    /// The harness or navigation failed
    Render,
    /// Capturing or writing the artifact failed
    Capture,
    /// Output path could not be prepared
    Io,
    /// Shutdown arrived while the page was in flight
    Interrupted,
    /// Anything else
    Other,
}

impl From<&BatchError> for FailureKind {
    fn from(error: &BatchError) -> Self {
        match error {
            BatchError::RenderTimeout { .. } => FailureKind::Timeout,
            BatchError::RenderFailure(_) => FailureKind::Render,
            BatchError::Capture(_) => FailureKind::Capture,
            BatchError::Io(_) => FailureKind::Io,
            BatchError::Interrupted => FailureKind::Interrupted,
            _ => FailureKind::Other,
        }
    }
}

/// A page that could not be exported
#[derive(Debug, Clone)]
pub struct PageFailure {
    /// The page
    pub page: Page,

    /// Category of the error
    pub kind: FailureKind,

    /// Error message
    pub message: String,
}

impl PageFailure {
    /// Create a failure record from the error that caused it
    pub fn new(page: Page, error: &BatchError) -> Self {
        Self {
            page,
            kind: FailureKind::from(error),
            message: error.to_string(),
        }
    }
}
