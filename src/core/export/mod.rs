//! Export orchestration
//!
//! This module provides the core export logic for drawio-batch, including:
//! - Page selection and serial scheduling
//! - Failure policy handling
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportSummary, FailureKind, PageFailure};
