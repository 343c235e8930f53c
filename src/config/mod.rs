//! Configuration management for drawio-batch.
//!
//! # Overview
//!
//! Settings are layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config`), with `${VAR_NAME}` substitution
//! 3. `DRAWIO_BATCH_*` environment variables
//! 4. Command-line flags
//!
//! The merged `[export]` section is then turned into an immutable
//! [`ExportOptions`] value, which is what the export pipeline consumes.
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`ExportConfig`] - format, quality, scale, page selection, failure policy
//! - [`RendererConfig`] - browser executable, harness, timeouts
//! - [`LoggingConfig`] - optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! format = "png"
//! scale = 2.0
//!
//! [renderer]
//! executable = "${CHROME_BIN}"
//! harness_path = "/opt/drawio/src/main/webapp/export2.html"
//! render_timeout_secs = 60
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! export DRAWIO_BATCH_EXPORT_FORMAT=jpg
//! export DRAWIO_BATCH_RENDERER_EXECUTABLE=/usr/bin/chromium
//! ```

pub mod loader;
pub mod options;
pub mod schema;

pub use loader::load_config;
pub use options::{
    parse_diagram_id, parse_format, parse_quality, parse_scale, parse_timeout_secs, ExportOptions,
    FailurePolicy,
};
pub use schema::{ApplicationConfig, BatchConfig, ExportConfig, LoggingConfig, RendererConfig};
