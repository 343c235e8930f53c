// drawio-batch - draw.io page exporter
// Copyright (c) 2025 drawio-batch Contributors
// Licensed under the MIT License

//! # drawio-batch - batch export of draw.io diagrams
//!
//! drawio-batch exports every page (or one selected page) of a draw.io
//! document to PDF, PNG or JPEG by driving a headless Chromium instance
//! through the draw.io rendering harness.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Indexing** the pages of a diagram document
//! - **Rendering** each page once in a shared browser tab
//! - **Materializing** the rendered page into a file sized to its content
//! - **Reporting** per-page outcomes in an export summary
//!
//! ## Architecture
//!
//! drawio-batch follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export pipeline (index, session, coordinator, output paths)
//! - [`adapters`] - Rendering environment traits and the Chromium adapter
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
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
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(None)?;
//!     let options = ExportOptions::from_config(&config.export)?;
//!     let document = load_document("architecture.drawio").await?;
//!
//!     let coordinator = ExportCoordinator::new(
//!         Arc::new(ChromiumLauncher::new(config.renderer.clone())),
//!         SessionOptions::from_config(&config.renderer)?,
//!     );
//!     let summary = coordinator
//!         .run(&document, &options, &OutputResolver::new("out"))
//!         .await?;
//!
//!     println!("Exported {} pages", summary.successful_pages());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All library errors are [`domain::BatchError`]:
//!
//! ```rust,no_run
//! use drawio_batch::domain::BatchError;
//!
//! fn example() -> Result<(), BatchError> {
//!     let config = drawio_batch::config::load_config(None)?;
//!     drawio_batch::config::ExportOptions::from_config(&config.export)?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
