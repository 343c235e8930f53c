//! Scripted rendering environment shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use drawio_batch::adapters::browser::{
    EnvironmentLauncher, PdfPage, RasterCapture, RenderEnvironment,
};
use drawio_batch::core::index::parse_document;
use drawio_batch::core::session::SessionOptions;
use drawio_batch::domain::{
    BatchError, BoundingBox, Document, ExportFormat, HarnessArgs, Result, Viewport,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const HARNESS_URL: &str = "file:///opt/drawio/export2.html";

/// Everything the environment was asked to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Navigate(String),
    Render {
        from: usize,
        format: ExportFormat,
        scale: f64,
    },
    Viewport(Viewport),
    Pdf(PdfPage),
    Screenshot {
        clip: BoundingBox,
        capture: RasterCapture,
    },
    Close,
}

/// How the harness answers a render call for one page
#[derive(Debug, Clone)]
pub enum Behavior {
    Bounds(BoundingBox),
    Fail(String),
    /// The browser went away underneath the harness
    Disconnect,
    Hang,
}

struct MockState {
    calls: Vec<Call>,
    launches: usize,
    fail_launch: bool,
    default_bounds: BoundingBox,
    pages: HashMap<usize, Behavior>,
}

/// Launcher handing out environments that share one recorded script
#[derive(Clone)]
pub struct MockLauncher {
    state: Arc<Mutex<MockState>>,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                calls: Vec::new(),
                launches: 0,
                fail_launch: false,
                default_bounds: BoundingBox::new(0.0, 0.0, 120.0, 80.0),
                pages: HashMap::new(),
            })),
        }
    }

    pub fn failing() -> Self {
        let launcher = Self::new();
        launcher.state.lock().unwrap().fail_launch = true;
        launcher
    }

    pub fn with_default_bounds(self, bounds: BoundingBox) -> Self {
        self.state.lock().unwrap().default_bounds = bounds;
        self
    }

    pub fn with_page(self, index: usize, behavior: Behavior) -> Self {
        self.state.lock().unwrap().pages.insert(index, behavior);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn launches(&self) -> usize {
        self.state.lock().unwrap().launches
    }

    pub fn closes(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Close).count()
    }

    /// Page indices passed to the harness, in call order
    pub fn rendered_pages(&self) -> Vec<usize> {
        self.calls()
            .iter()
            .filter_map(|c| match c {
                Call::Render { from, .. } => Some(*from),
                _ => None,
            })
            .collect()
    }

    pub fn shared(&self) -> Arc<dyn EnvironmentLauncher> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl EnvironmentLauncher for MockLauncher {
    async fn launch(&self) -> Result<Box<dyn RenderEnvironment>> {
        let mut state = self.state.lock().unwrap();
        state.launches += 1;
        if state.fail_launch {
            return Err(BatchError::EnvironmentLaunch(
                "browser executable not found".to_string(),
            ));
        }
        Ok(Box::new(MockEnvironment {
            state: Arc::clone(&self.state),
            current_page: None,
        }))
    }
}

struct MockEnvironment {
    state: Arc<Mutex<MockState>>,
    current_page: Option<usize>,
}

impl MockEnvironment {
    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    /// Artifact bytes name the page they came from
    fn payload(&self, kind: &str) -> Vec<u8> {
        match self.current_page {
            Some(index) => format!("{kind} page {index}").into_bytes(),
            None => kind.as_bytes().to_vec(),
        }
    }
}

#[async_trait]
impl RenderEnvironment for MockEnvironment {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.record(Call::Navigate(url.to_string()));
        Ok(())
    }

    async fn render(&mut self, args: &HarnessArgs<'_>) -> Result<BoundingBox> {
        self.current_page = Some(args.from);
        let behavior = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Render {
                from: args.from,
                format: args.format,
                scale: args.scale,
            });
            state
                .pages
                .get(&args.from)
                .cloned()
                .unwrap_or(Behavior::Bounds(state.default_bounds))
        };

        match behavior {
            Behavior::Bounds(bounds) => Ok(bounds),
            Behavior::Fail(message) => Err(BatchError::RenderFailure(message)),
            Behavior::Disconnect => Err(BatchError::Io(
                "rendering environment is closed".to_string(),
            )),
            Behavior::Hang => std::future::pending().await,
        }
    }

    async fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.record(Call::Viewport(viewport));
        Ok(())
    }

    async fn print_pdf(&mut self, page: &PdfPage) -> Result<Vec<u8>> {
        self.record(Call::Pdf(page.clone()));
        Ok(self.payload("%PDF"))
    }

    async fn screenshot(&mut self, clip: &BoundingBox, capture: RasterCapture) -> Result<Vec<u8>> {
        self.record(Call::Screenshot {
            clip: *clip,
            capture,
        });
        Ok(self.payload("IMG"))
    }

    async fn close(&mut self) -> Result<()> {
        self.record(Call::Close);
        Ok(())
    }
}

/// A document with one page per name
pub fn document_xml(names: &[&str]) -> String {
    let pages: String = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!(r#"<diagram id="d{i}" name="{name}">compressed</diagram>"#))
        .collect();
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><mxfile host="test">{pages}</mxfile>"#)
}

pub fn document(names: &[&str]) -> Document {
    parse_document(document_xml(names)).unwrap()
}

pub fn session_options(render_timeout: Duration) -> SessionOptions {
    SessionOptions::new(
        Url::parse(HARNESS_URL).unwrap(),
        render_timeout,
        Duration::from_secs(5),
    )
}
