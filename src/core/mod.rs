//! Core export pipeline for drawio-batch.
//!
//! # Modules
//!
//! - [`index`] - Page listing from the diagram document
//! - [`output`] - Artifact path resolution and output directory creation
//! - [`session`] - The single rendering session shared by all pages
//! - [`export`] - Orchestration, failure policy and summary
//!
//! # Export Workflow
//!
//! 1. **Index**: Parse the document and list its pages
//! 2. **Select**: Keep every page, or only the requested index
//! 3. **Open**: Launch the rendering environment once
//! 4. **Render**: Lay out each page and size the viewport to its bounding box
//! 5. **Materialize**: Capture the page as pdf, png or jpg
//! 6. **Close**: Release the environment, on every path
//! 7. **Report**: Generate the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use drawio_batch::adapters::browser::ChromiumLauncher;
//! use drawio_batch::config::{load_config, ExportOptions};
//! use drawio_batch::core::export::ExportCoordinator;
//! use drawio_batch::core::index::load_document;
//! use drawio_batch::core::output::OutputResolver;
//! use drawio_batch::core::session::SessionOptions;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let options = ExportOptions::from_config(&config.export)?;
//! let document = load_document("diagram.drawio").await?;
//!
//! let launcher = Arc::new(ChromiumLauncher::new(config.renderer.clone()));
//! let coordinator = ExportCoordinator::new(launcher, SessionOptions::from_config(&config.renderer)?);
//!
//! let summary = coordinator
//!     .run(&document, &options, &OutputResolver::new("out"))
//!     .await?;
//! println!("Exported {} of {} pages", summary.successful_pages(), summary.selected_pages);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod index;
pub mod output;
pub mod session;
