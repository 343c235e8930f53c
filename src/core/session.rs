//! Render session - one rendering environment reused across pages
//!
//! The session owns the environment's single tab. Pages are rendered one at
//! a time: both [`RenderSession::render_page`] and
//! [`RenderSession::materialize`] take `&mut self`, so a second render cannot
//! start while one is in flight.
//!
//! Lifecycle: `open` → (`render_page` → `materialize`)* → `close`. `close`
//! must run on every exit path; the coordinator guarantees it, and dropping an
//! unclosed session falls back to the environment's own drop handling.

use crate::adapters::browser::{EnvironmentLauncher, PdfPage, RasterCapture, RenderEnvironment};
use crate::config::RendererConfig;
use crate::domain::{Artifact, BatchError, BoundingBox, ExportFormat, Page, RenderRequest, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;
use url::Url;

/// Settings fixed for the lifetime of a session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// URL of the rendering harness the tab navigates to before every render
    pub harness_url: Url,

    /// Upper bound on one harness callback
    pub render_timeout: Duration,

    /// Upper bound on starting the environment
    pub launch_timeout: Duration,
}

impl SessionOptions {
    /// Creates session options
    pub fn new(harness_url: Url, render_timeout: Duration, launch_timeout: Duration) -> Self {
        Self {
            harness_url,
            render_timeout,
            launch_timeout,
        }
    }

    /// Builds options from the `[renderer]` section
    ///
    /// A relative harness path is looked up in the working directory first,
    /// then next to the executable, and turned into a `file://` URL.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ConfigValidation`] if the harness file does not
    /// exist.
    pub fn from_config(config: &RendererConfig) -> Result<Self> {
        let located = locate_harness(&config.harness_path, install_dir().as_deref());
        let harness = std::fs::canonicalize(&located).map_err(|e| {
            BatchError::ConfigValidation(format!(
                "Rendering harness not found at {}: {}",
                config.harness_path.display(),
                e
            ))
        })?;
        let harness_url = Url::from_file_path(&harness).map_err(|_| {
            BatchError::ConfigValidation(format!(
                "Rendering harness path is not absolute: {}",
                harness.display()
            ))
        })?;

        Ok(Self::new(
            harness_url,
            Duration::from_secs(config.render_timeout_secs),
            Duration::from_secs(config.launch_timeout_secs),
        ))
    }
}

/// Directory holding the running executable
fn install_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()?
        .parent()
        .map(Path::to_path_buf)
}

fn locate_harness(path: &Path, install_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    install_dir
        .map(|dir| dir.join(path))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Ready,
    Closed,
}

/// A rendering environment with one tab, owned for the whole export
pub struct RenderSession {
    environment: Box<dyn RenderEnvironment>,
    options: SessionOptions,
    shutdown: Option<watch::Receiver<bool>>,
    state: SessionState,
}

impl RenderSession {
    /// Launches the environment and opens its tab
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::EnvironmentLaunch`] if the launcher fails or does
    /// not finish within the launch timeout.
    pub async fn open(launcher: &dyn EnvironmentLauncher, options: SessionOptions) -> Result<Self> {
        let environment = tokio::time::timeout(options.launch_timeout, launcher.launch())
            .await
            .map_err(|_| {
                BatchError::EnvironmentLaunch(format!(
                    "environment did not start within {}s",
                    options.launch_timeout.as_secs()
                ))
            })??;

        tracing::debug!(harness = %options.harness_url, "Render session ready");

        Ok(Self {
            environment,
            options,
            shutdown: None,
            state: SessionState::Ready,
        })
    }

    /// Aborts in-flight renders when the receiver flips to `true`
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Renders one page and returns its bounding box
    ///
    /// Navigates the tab to the harness, renders page `page_index` of
    /// `document`, then sizes the viewport to contain the returned box so the
    /// capture that follows sees the whole diagram.
    ///
    /// # Errors
    ///
    /// - [`BatchError::ConfigValidation`] for a non-positive scale
    /// - [`BatchError::RenderTimeout`] if the harness does not call back in time
    /// - [`BatchError::RenderFailure`] if navigation or the harness fails, or
    ///   the box is unusable
    /// - [`BatchError::Interrupted`] if shutdown was requested
    /// - [`BatchError::Io`] if the session was already closed
    pub async fn render_page(
        &mut self,
        document: &str,
        page_index: usize,
        format: ExportFormat,
        scale: f64,
    ) -> Result<BoundingBox> {
        self.ensure_ready()?;
        let request = RenderRequest::new(format, scale, page_index)?;
        let render_timeout = self.options.render_timeout;

        let Self {
            environment,
            options,
            shutdown,
            ..
        } = self;

        interruptible(shutdown.as_mut(), environment.navigate(options.harness_url.as_str()))
            .await??;

        let args = request.harness_args(document);
        let bounds = interruptible(
            shutdown.as_mut(),
            tokio::time::timeout(render_timeout, environment.render(&args)),
        )
        .await?
        .map_err(|_| BatchError::RenderTimeout {
            page: request.page_index(),
            timeout: render_timeout,
        })??;

        bounds.validate().map_err(BatchError::RenderFailure)?;

        let viewport = bounds.viewport();
        environment.set_viewport(viewport).await?;

        tracing::debug!(
            page = request.page_index(),
            format = %request.format(),
            scale = request.scale(),
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            viewport_width = viewport.width,
            viewport_height = viewport.height,
            "Rendered page"
        );

        Ok(bounds)
    }

    /// Writes the rendered page to `output_path`
    ///
    /// - pdf: one page of `viewport width x (viewport height + 1)` pixels
    /// - png: lossless capture clipped to `bounds`
    /// - jpg: capture clipped to `bounds` at `quality`
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Capture`] if capturing or writing fails.
    pub async fn materialize(
        &mut self,
        page: &Page,
        format: ExportFormat,
        bounds: &BoundingBox,
        quality: u8,
        output_path: &Path,
    ) -> Result<Artifact> {
        self.ensure_ready()?;

        let Self {
            environment,
            shutdown,
            ..
        } = self;

        let capture = async {
            match format {
                ExportFormat::Pdf => {
                    let viewport = bounds.viewport();
                    environment
                        .print_pdf(&PdfPage::first_page(viewport.width, viewport.height + 1))
                        .await
                }
                ExportFormat::Png => environment.screenshot(bounds, RasterCapture::Png).await,
                ExportFormat::Jpg => {
                    environment
                        .screenshot(bounds, RasterCapture::Jpeg { quality })
                        .await
                }
            }
        };
        let bytes = interruptible(shutdown.as_mut(), capture).await??;

        tokio::fs::write(output_path, &bytes).await.map_err(|e| {
            BatchError::Capture(format!("Failed to write {}: {}", output_path.display(), e))
        })?;

        Ok(Artifact {
            page: page.clone(),
            format,
            path: output_path.to_path_buf(),
            bytes: bytes.len(),
        })
    }

    /// Releases the environment
    ///
    /// # Errors
    ///
    /// Returns the environment's error if it could not shut down cleanly.
    pub async fn close(mut self) -> Result<()> {
        self.state = SessionState::Closed;
        self.environment.close().await
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::Closed => Err(BatchError::Io("render session is closed".to_string())),
        }
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        if self.state == SessionState::Ready {
            tracing::warn!("Render session dropped without close");
        }
    }
}

/// Runs `future` unless shutdown is requested first
async fn interruptible<F: Future>(
    shutdown: Option<&mut watch::Receiver<bool>>,
    future: F,
) -> Result<F::Output> {
    let Some(shutdown) = shutdown else {
        return Ok(future.await);
    };

    if *shutdown.borrow() {
        return Err(BatchError::Interrupted);
    }

    tokio::select! {
        output = future => Ok(output),
        _ = shutdown_requested(shutdown) => Err(BatchError::Interrupted),
    }
}

async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    let sender_gone = shutdown.wait_for(|stop| *stop).await.is_err();
    if sender_gone {
        std::future::pending::<()>().await;
    }
}
