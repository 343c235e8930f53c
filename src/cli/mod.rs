//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for drawio-batch using clap.
//!
//! Numeric and format options are taken as raw strings and validated by the
//! `config` parsers, so a bad value is reported as a configuration error
//! (exit code 1) before anything is launched.

pub mod commands;

use crate::config::{
    parse_diagram_id, parse_format, parse_quality, parse_scale, parse_timeout_secs, BatchConfig,
};
use crate::domain::{BatchError, Result};
use clap::Parser;
use std::path::PathBuf;

/// drawio-batch - export draw.io diagram pages to PDF, PNG or JPEG
#[derive(Parser, Debug)]
#[command(name = "drawio-batch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Diagram document to export
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory the exported pages are written to
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Output format (pdf, png, jpg) [default: pdf]
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality, 1 to 100 [default: 75]
    #[arg(short, long, value_name = "QUALITY", allow_negative_numbers = true)]
    pub quality: Option<String>,

    /// Scale factor of the rendered diagram [default: 1.0]
    #[arg(short, long, value_name = "SCALE", allow_negative_numbers = true)]
    pub scale: Option<String>,

    /// Index of the single page to export, starting at 0 [default: all pages]
    #[arg(short, long, value_name = "INDEX", allow_negative_numbers = true)]
    pub diagram_id: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", env = "DRAWIO_BATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DRAWIO_BATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Seconds to wait for one page to render
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<String>,

    /// Browser executable
    #[arg(long, value_name = "PATH")]
    pub chrome: Option<PathBuf>,

    /// Rendering harness HTML file; relative paths are tried in the working
    /// directory, then next to the executable
    #[arg(long, value_name = "PATH")]
    pub harness: Option<PathBuf>,

    /// Stop after the first page that fails
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ConfigValidation`] for the first invalid value,
    /// or if the merged configuration does not validate.
    pub fn apply_overrides(&self, config: &mut BatchConfig) -> Result<()> {
        if let Some(format) = &self.format {
            config.export.format = parse_format(format)?;
        }
        if let Some(quality) = &self.quality {
            config.export.quality = parse_quality(quality)?;
        }
        if let Some(scale) = &self.scale {
            config.export.scale = parse_scale(scale)?;
        }
        if let Some(diagram_id) = &self.diagram_id {
            config.export.diagram_id = parse_diagram_id(diagram_id)?;
        }
        if self.fail_fast {
            config.export.fail_fast = true;
        }

        if let Some(timeout) = &self.timeout {
            config.renderer.render_timeout_secs = parse_timeout_secs(timeout)?;
        }
        if let Some(chrome) = &self.chrome {
            config.renderer.executable = Some(chrome.clone());
        }
        if let Some(harness) = &self.harness {
            config.renderer.harness_path = harness.clone();
        }

        if let Some(level) = &self.log_level {
            config.application.log_level = level.to_lowercase();
        }

        config.validate().map_err(BatchError::ConfigValidation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExportFormat;

    #[test]
    fn test_cli_parse_positionals() {
        let cli = Cli::parse_from(["drawio-batch", "diagram.drawio", "out"]);
        assert_eq!(cli.input, PathBuf::from("diagram.drawio"));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert!(cli.format.is_none());
        assert!(!cli.fail_fast);
    }

    #[test]
    fn test_cli_requires_input_and_output() {
        assert!(Cli::try_parse_from(["drawio-batch", "diagram.drawio"]).is_err());
    }

    #[test]
    fn test_cli_parse_short_flags() {
        let cli = Cli::parse_from([
            "drawio-batch",
            "-f",
            "jpg",
            "-q",
            "90",
            "-s",
            "2",
            "-d",
            "3",
            "in.drawio",
            "out",
        ]);
        assert_eq!(cli.format.as_deref(), Some("jpg"));
        assert_eq!(cli.quality.as_deref(), Some("90"));
        assert_eq!(cli.scale.as_deref(), Some("2"));
        assert_eq!(cli.diagram_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_cli_accepts_negative_values_for_validation() {
        let cli = Cli::parse_from(["drawio-batch", "-s", "-1", "-d", "-1", "in", "out"]);
        assert_eq!(cli.scale.as_deref(), Some("-1"));
        assert_eq!(cli.diagram_id.as_deref(), Some("-1"));
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "drawio-batch",
            "--format",
            "png",
            "--scale",
            "1.5",
            "--timeout",
            "5",
            "--chrome",
            "/usr/bin/chromium",
            "--fail-fast",
            "in",
            "out",
        ]);
        let mut config = BatchConfig::default();
        cli.apply_overrides(&mut config).unwrap();

        assert_eq!(config.export.format, ExportFormat::Png);
        assert_eq!(config.export.scale, 1.5);
        assert!(config.export.fail_fast);
        assert_eq!(config.renderer.render_timeout_secs, 5);
        assert_eq!(
            config.renderer.executable,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }

    #[test]
    fn test_apply_overrides_rejects_invalid_values() {
        let cases: [&[&str]; 6] = [
            &["-q", "0"],
            &["-q", "101"],
            &["-s", "0"],
            &["-s", "-1"],
            &["-d", "0.5"],
            &["-f", "gif"],
        ];
        for flags in cases {
            let mut args = vec!["drawio-batch"];
            args.extend_from_slice(flags);
            args.extend_from_slice(&["in", "out"]);
            let cli = Cli::parse_from(args);

            let mut config = BatchConfig::default();
            let result = cli.apply_overrides(&mut config);
            assert!(
                matches!(result, Err(BatchError::ConfigValidation(_))),
                "{flags:?}"
            );
        }
    }

    #[test]
    fn test_apply_overrides_rejects_unknown_log_level() {
        let cli = Cli::parse_from(["drawio-batch", "-l", "loud", "in", "out"]);
        let mut config = BatchConfig::default();
        assert!(cli.apply_overrides(&mut config).is_err());
    }
}
