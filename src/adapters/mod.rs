//! External system integrations for drawio-batch.
//!
//! - [`browser`] - The rendering environment: traits plus the headless
//!   Chromium implementation
//!
//! # Design Pattern
//!
//! Adapters isolate external processes behind traits so the export pipeline
//! can be tested with mock implementations. The pipeline only depends on
//! [`browser::RenderEnvironment`] and [`browser::EnvironmentLauncher`].

pub mod browser;
