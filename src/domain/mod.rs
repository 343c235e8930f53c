//! Domain models and types for drawio-batch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Document model** ([`Document`], [`Page`])
//! - **Render inputs and outputs** ([`RenderRequest`], [`BoundingBox`], [`Viewport`], [`Artifact`])
//! - **Export choices** ([`ExportFormat`], [`PageSelection`])
//! - **Error types** ([`BatchError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BatchError>`]:
//!
//! ```rust
//! use drawio_batch::domain::{RenderRequest, ExportFormat, Result};
//!
//! fn example() -> Result<RenderRequest> {
//!     // A zero scale is rejected at construction
//!     let request = RenderRequest::new(ExportFormat::Png, 1.0, 0)?;
//!     Ok(request)
//! }
//! ```

pub mod artifact;
pub mod errors;
pub mod format;
pub mod geometry;
pub mod page;
pub mod request;
pub mod result;

pub use artifact::Artifact;
pub use errors::BatchError;
pub use format::ExportFormat;
pub use geometry::{BoundingBox, Viewport};
pub use page::{Document, Page};
pub use request::{HarnessArgs, PageSelection, RenderRequest};
pub use result::Result;
