//! Rendering environment traits
//!
//! This module defines the interface between the render session and the
//! external process that lays diagrams out. The session only ever talks to a
//! [`RenderEnvironment`]; how the process is started lives behind an
//! [`EnvironmentLauncher`].

use crate::domain::{BoundingBox, HarnessArgs, Result, Viewport};
use async_trait::async_trait;

/// Paper size for a paginated capture, in CSS pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// Paper width
    pub width: u32,

    /// Paper height
    pub height: u32,

    /// Page ranges to keep, e.g. `"1"`
    pub page_ranges: String,
}

impl PdfPage {
    /// A single page of the given size, keeping only the first printed page
    pub fn first_page(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            page_ranges: "1".to_string(),
        }
    }
}

/// Encoding for a clipped raster capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterCapture {
    /// Lossless
    Png,
    /// Lossy at the given quality (1..=100)
    Jpeg { quality: u8 },
}

/// One running rendering environment with a single tab
///
/// Implementations are driven by exactly one session; calls never overlap.
///
/// # Example
///
/// ```no_run
/// use drawio_batch::adapters::browser::{EnvironmentLauncher, ChromiumLauncher};
/// use drawio_batch::config::RendererConfig;
///
/// # async fn example() -> drawio_batch::domain::Result<()> {
/// let launcher = ChromiumLauncher::new(RendererConfig::default());
/// let mut environment = launcher.launch().await?;
/// environment.navigate("file:///opt/drawio/export2.html").await?;
/// environment.close().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RenderEnvironment: Send {
    /// Navigate the tab to `url` and wait until it has loaded
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::RenderFailure`](crate::domain::BatchError::RenderFailure)
    /// if navigation fails.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Invoke the harness `render` function and wait for its callback
    ///
    /// This is the one unbounded wait of the pipeline; callers are expected
    /// to bound it.
    async fn render(&mut self, args: &HarnessArgs<'_>) -> Result<BoundingBox>;

    /// Resize the tab viewport at device scale factor 1
    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Print the current tab to PDF bytes
    async fn print_pdf(&mut self, page: &PdfPage) -> Result<Vec<u8>>;

    /// Capture the region `clip` of the current tab
    async fn screenshot(&mut self, clip: &BoundingBox, capture: RasterCapture) -> Result<Vec<u8>>;

    /// Release the tab and the process
    async fn close(&mut self) -> Result<()>;
}

/// Starts rendering environments
#[async_trait]
pub trait EnvironmentLauncher: Send + Sync {
    /// Launch a new environment with one open tab
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::EnvironmentLaunch`](crate::domain::BatchError::EnvironmentLaunch)
    /// if the process cannot be started.
    async fn launch(&self) -> Result<Box<dyn RenderEnvironment>>;
}
