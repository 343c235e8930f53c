//! Configuration schema types
//!
//! This module defines the configuration structure that maps onto the
//! optional TOML file. Every section has defaults, so an empty file (or no
//! file at all) is a valid configuration.

use crate::domain::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export defaults (overridden by CLI flags)
    #[serde(default)]
    pub export: ExportConfig,

    /// Rendering environment settings
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.renderer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format (pdf, png or jpg)
    #[serde(default)]
    pub format: ExportFormat,

    /// JPEG quality, 1..=100
    #[serde(default = "default_quality")]
    pub quality: i64,

    /// Scale factor for the rendered diagram, > 0
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Page index to export, -1 for all pages
    #[serde(default = "default_diagram_id")]
    pub diagram_id: i64,

    /// Stop after the first failed page instead of continuing
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            quality: default_quality(),
            scale: default_scale(),
            diagram_id: default_diagram_id(),
            fail_fast: false,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.quality) {
            return Err(format!(
                "export.quality must be between 1 and 100, got {}",
                self.quality
            ));
        }

        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(format!("export.scale must be > 0, got {}", self.scale));
        }

        if self.diagram_id < -1 {
            return Err(format!(
                "export.diagram_id must be -1 (all pages) or a page index, got {}",
                self.diagram_id
            ));
        }

        Ok(())
    }
}

/// Rendering environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Browser executable; auto-detected when absent
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// Static HTML harness exposing the global `render` function
    #[serde(default = "default_harness_path")]
    pub harness_path: PathBuf,

    /// Maximum time to wait for one page to render
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,

    /// Maximum time to wait for the browser to start
    #[serde(default = "default_launch_timeout_secs")]
    pub launch_timeout_secs: u64,

    /// Run without a visible window
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Additional browser command-line flags
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            executable: None,
            harness_path: default_harness_path(),
            render_timeout_secs: default_render_timeout_secs(),
            launch_timeout_secs: default_launch_timeout_secs(),
            headless: true,
            extra_args: Vec::new(),
        }
    }
}

impl RendererConfig {
    fn validate(&self) -> Result<(), String> {
        if self.render_timeout_secs == 0 {
            return Err("renderer.render_timeout_secs must be > 0".to_string());
        }
        if self.launch_timeout_secs == 0 {
            return Err("renderer.launch_timeout_secs must be > 0".to_string());
        }
        if self.harness_path.as_os_str().is_empty() {
            return Err("renderer.harness_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_quality() -> i64 {
    75
}

fn default_scale() -> f64 {
    1.0
}

fn default_diagram_id() -> i64 {
    -1
}

fn default_harness_path() -> PathBuf {
    PathBuf::from("drawio/src/main/webapp/export2.html")
}

fn default_render_timeout_secs() -> u64 {
    60
}

fn default_launch_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
