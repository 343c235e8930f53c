//! Headless Chromium rendering environment
//!
//! Drives a Chromium instance over the DevTools protocol with `chromiumoxide`.
//! The harness signals completion by calling `window.callPhantom(bounds)`; the
//! evaluated expression wraps that callback in a promise, so the bridge is a
//! plain `Runtime.evaluate` with `awaitPromise`.

use super::traits::{EnvironmentLauncher, PdfPage, RasterCapture, RenderEnvironment};
use crate::config::RendererConfig;
use crate::domain::{BatchError, BoundingBox, HarnessArgs, Result, Viewport};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, PrintToPdfParams, Viewport as ClipRegion,
};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

/// CSS pixels per inch, the unit CDP expects for paper sizes
const PIXELS_PER_INCH: f64 = 96.0;

/// Flags every launch carries on top of `--no-sandbox`
const REQUIRED_ARGS: [&str; 1] = ["--allow-file-access-from-files"];

/// Launches Chromium according to [`RendererConfig`]
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    config: RendererConfig,
}

impl ChromiumLauncher {
    /// Create a launcher
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder().no_sandbox();

        for arg in REQUIRED_ARGS {
            builder = builder.arg(arg);
        }
        for arg in &self.config.extra_args {
            builder = builder.arg(arg.as_str());
        }
        if !self.config.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &self.config.executable {
            builder = builder.chrome_executable(executable);
        }

        builder.build().map_err(BatchError::EnvironmentLaunch)
    }
}

#[async_trait]
impl EnvironmentLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn RenderEnvironment>> {
        let browser_config = self.browser_config()?;

        tracing::debug!(
            executable = ?self.config.executable,
            headless = self.config.headless,
            "Launching Chromium"
        );

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| BatchError::EnvironmentLaunch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "Chromium protocol handler error");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(BatchError::EnvironmentLaunch(format!(
                    "Failed to open tab: {e}"
                )));
            }
        };

        tracing::info!("Chromium rendering environment started");

        Ok(Box::new(ChromiumEnvironment {
            browser: Some(browser),
            page: Some(page),
            handler_task: Some(handler_task),
        }))
    }
}

/// A running Chromium with one tab
///
/// Dropping it without [`RenderEnvironment::close`] still kills the child
/// process through `chromiumoxide`'s own drop handling.
pub struct ChromiumEnvironment {
    browser: Option<Browser>,
    page: Option<Page>,
    handler_task: Option<JoinHandle<()>>,
}

impl ChromiumEnvironment {
    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| BatchError::Io("rendering environment is closed".to_string()))
    }
}

/// Promise wrapping the harness callback bridge
fn render_expression(args: &HarnessArgs<'_>) -> Result<String> {
    let args = serde_json::to_string(args)?;
    Ok(format!(
        "new Promise(function (resolve, reject) {{\n\
         \x20 window.callPhantom = function (bounds) {{ resolve(bounds); }};\n\
         \x20 try {{ render({args}); }} catch (e) {{ reject(String(e)); }}\n\
         }})"
    ))
}

fn px_to_inches(px: u32) -> f64 {
    f64::from(px) / PIXELS_PER_INCH
}

#[async_trait]
impl RenderEnvironment for ChromiumEnvironment {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page()?
            .goto(url)
            .await
            .map_err(|e| BatchError::RenderFailure(format!("Failed to load {url}: {e}")))?;
        Ok(())
    }

    async fn render(&mut self, args: &HarnessArgs<'_>) -> Result<BoundingBox> {
        let params = EvaluateParams::builder()
            .expression(render_expression(args)?)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(BatchError::RenderFailure)?;

        let result = self
            .page()?
            .evaluate_expression(params)
            .await
            .map_err(|e| BatchError::RenderFailure(format!("Harness error: {e}")))?;

        Ok(result.into_value::<BoundingBox>()?)
    }

    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::new(
            i64::from(viewport.width),
            i64::from(viewport.height),
            1.0,
            false,
        );
        self.page()?
            .execute(params)
            .await
            .map_err(|e| BatchError::RenderFailure(format!("Failed to set viewport: {e}")))?;
        Ok(())
    }

    async fn print_pdf(&mut self, page: &PdfPage) -> Result<Vec<u8>> {
        let params = PrintToPdfParams {
            paper_width: Some(px_to_inches(page.width)),
            paper_height: Some(px_to_inches(page.height)),
            page_ranges: Some(page.page_ranges.clone()),
            margin_top: Some(0.0),
            margin_bottom: Some(0.0),
            margin_left: Some(0.0),
            margin_right: Some(0.0),
            ..Default::default()
        };
        self.page()?
            .pdf(params)
            .await
            .map_err(|e| BatchError::Capture(format!("PDF generation failed: {e}")))
    }

    async fn screenshot(&mut self, clip: &BoundingBox, capture: RasterCapture) -> Result<Vec<u8>> {
        let region = ClipRegion {
            x: clip.x,
            y: clip.y,
            width: clip.width,
            height: clip.height,
            scale: 1.0,
        };
        let builder = ScreenshotParams::builder().clip(region);
        let params = match capture {
            RasterCapture::Png => builder.format(CaptureScreenshotFormat::Png).build(),
            RasterCapture::Jpeg { quality } => builder
                .format(CaptureScreenshotFormat::Jpeg)
                .quality(i64::from(quality))
                .build(),
        };
        self.page()?
            .screenshot(params)
            .await
            .map_err(|e| BatchError::Capture(format!("Screenshot failed: {e}")))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::debug!(error = %e, "Failed to close tab");
            }
        }

        let result = match self.browser.take() {
            Some(mut browser) => {
                let closed = browser.close().await.map(|_| ());
                let _ = browser.wait().await;
                closed.map_err(|e| BatchError::Io(format!("Failed to close Chromium: {e}")))
            }
            None => Ok(()),
        };

        if let Some(task) = self.handler_task.take() {
            task.abort();
        }

        tracing::info!("Chromium rendering environment closed");
        result
    }
}

impl Drop for ChromiumEnvironment {
    fn drop(&mut self) {
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
        if self.browser.is_some() {
            tracing::warn!("Chromium environment dropped without close, killing process");
        }
    }
}
