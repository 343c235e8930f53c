//! Rendering environment integration
//!
//! - [`traits`] - the [`RenderEnvironment`] / [`EnvironmentLauncher`] seam
//! - [`chromium`] - headless Chromium over the DevTools protocol

pub mod chromium;
pub mod traits;

pub use chromium::{ChromiumEnvironment, ChromiumLauncher};
pub use traits::{EnvironmentLauncher, PdfPage, RasterCapture, RenderEnvironment};
