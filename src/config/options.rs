//! Validated export options
//!
//! [`ExportOptions`] is the immutable value the coordinator runs with. It is
//! built once, after the configuration file, environment and CLI flags have
//! been merged, and every range check happens here rather than mid-export.

use super::schema::ExportConfig;
use crate::domain::{BatchError, ExportFormat, PageSelection, Result};

/// What to do with the remaining pages after a page fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and export the remaining pages
    #[default]
    Continue,
    /// Stop scheduling pages after the first failure
    FailFast,
}

/// Immutable, validated export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    format: ExportFormat,
    quality: u8,
    scale: f64,
    selection: PageSelection,
    failure_policy: FailurePolicy,
}

impl ExportOptions {
    /// Creates validated options
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::ConfigValidation`] if quality is outside
    /// `1..=100`, scale is not a positive finite number, or `diagram_id` is
    /// below -1.
    ///
    /// # Examples
    ///
    /// ```
    /// use drawio_batch::config::{ExportOptions, FailurePolicy};
    /// use drawio_batch::domain::{ExportFormat, PageSelection};
    ///
    /// let options = ExportOptions::new(ExportFormat::Jpg, 90, 1.5, -1, FailurePolicy::Continue).unwrap();
    /// assert_eq!(options.quality(), 90);
    /// assert_eq!(options.selection(), PageSelection::All);
    ///
    /// assert!(ExportOptions::new(ExportFormat::Jpg, 0, 1.0, -1, FailurePolicy::Continue).is_err());
    /// ```
    pub fn new(
        format: ExportFormat,
        quality: i64,
        scale: f64,
        diagram_id: i64,
        failure_policy: FailurePolicy,
    ) -> Result<Self> {
        let quality = u8::try_from(quality)
            .ok()
            .filter(|q| (1..=100).contains(q))
            .ok_or_else(|| {
                BatchError::ConfigValidation(format!(
                    "Invalid quality value given: {quality}. Must be between 1 and 100"
                ))
            })?;

        if !scale.is_finite() || scale <= 0.0 {
            return Err(BatchError::ConfigValidation(format!(
                "Invalid scale value given: {scale}. Must be a positive number"
            )));
        }

        Ok(Self {
            format,
            quality,
            scale,
            selection: PageSelection::from_raw(diagram_id)?,
            failure_policy,
        })
    }

    /// Builds options from the `[export]` configuration section
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        let policy = if config.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Continue
        };
        Self::new(
            config.format,
            config.quality,
            config.scale,
            config.diagram_id,
            policy,
        )
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// JPEG quality; carried for every format but only used for jpg
    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn selection(&self) -> PageSelection {
        self.selection
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}

/// Parses a `--quality` value
pub fn parse_quality(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|q| (1..=100).contains(q))
        .ok_or_else(|| {
            BatchError::ConfigValidation(format!(
                "Invalid quality value given: '{value}'. Must be an integer between 1 and 100"
            ))
        })
}

/// Parses a `--scale` value
pub fn parse_scale(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s > 0.0)
        .ok_or_else(|| {
            BatchError::ConfigValidation(format!(
                "Invalid scale value given: '{value}'. Must be a positive number"
            ))
        })
}

/// Parses a `--diagram-id` value: a page index, or -1 for all pages
pub fn parse_diagram_id(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= -1)
        .ok_or_else(|| {
            BatchError::ConfigValidation(format!(
                "Invalid diagram-id value given: '{value}'. Must be a page index starting at 0"
            ))
        })
}

/// Parses a `--format` value
pub fn parse_format(value: &str) -> Result<ExportFormat> {
    value.parse().map_err(BatchError::ConfigValidation)
}

/// Parses a `--timeout` value in whole seconds
pub fn parse_timeout_secs(value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| {
            BatchError::ConfigValidation(format!(
                "Invalid timeout value given: '{value}'. Must be a positive number of seconds"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_values() {
        let options =
            ExportOptions::new(ExportFormat::Png, 100, 0.5, 3, FailurePolicy::FailFast).unwrap();
        assert_eq!(options.format(), ExportFormat::Png);
        assert_eq!(options.quality(), 100);
        assert_eq!(options.scale(), 0.5);
        assert_eq!(options.selection(), PageSelection::Index(3));
        assert_eq!(options.failure_policy(), FailurePolicy::FailFast);
    }

    #[test]
    fn test_new_rejects_out_of_range_values() {
        let cases: [(i64, f64, i64); 6] = [
            (0, 1.0, -1),
            (101, 1.0, -1),
            (300, 1.0, -1),
            (75, 0.0, -1),
            (75, -1.0, -1),
            (75, 1.0, -2),
        ];
        for (quality, scale, diagram_id) in cases {
            let result = ExportOptions::new(
                ExportFormat::Jpg,
                quality,
                scale,
                diagram_id,
                FailurePolicy::Continue,
            );
            assert!(
                matches!(result, Err(BatchError::ConfigValidation(_))),
                "quality={quality} scale={scale} diagram_id={diagram_id}"
            );
        }
    }

    #[test]
    fn test_from_config_defaults() {
        let options = ExportOptions::from_config(&ExportConfig::default()).unwrap();
        assert_eq!(options.format(), ExportFormat::Pdf);
        assert_eq!(options.quality(), 75);
        assert_eq!(options.scale(), 1.0);
        assert_eq!(options.selection(), PageSelection::All);
        assert_eq!(options.failure_policy(), FailurePolicy::Continue);
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!(parse_quality("1").unwrap(), 1);
        assert_eq!(parse_quality("100").unwrap(), 100);
        for bad in ["0", "101", "-5", "abc", "7.5", ""] {
            assert!(parse_quality(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("1.0").unwrap(), 1.0);
        assert_eq!(parse_scale("0.25").unwrap(), 0.25);
        for bad in ["0", "-1", "NaN", "inf", "x"] {
            assert!(parse_scale(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_parse_diagram_id() {
        assert_eq!(parse_diagram_id("0").unwrap(), 0);
        assert_eq!(parse_diagram_id("12").unwrap(), 12);
        assert_eq!(parse_diagram_id("-1").unwrap(), -1);
        for bad in ["0.5", "-2", "first", ""] {
            assert!(parse_diagram_id(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("30").unwrap(), 30);
        for bad in ["0", "-1", "1.5", "soon"] {
            assert!(parse_timeout_secs(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("jpg").unwrap(), ExportFormat::Jpg);
        assert!(matches!(
            parse_format("gif"),
            Err(BatchError::ConfigValidation(_))
        ));
    }
}
