//! Output formats supported by the exporter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Artifact format for an exported page
///
/// # Examples
///
/// ```
/// use drawio_batch::domain::ExportFormat;
/// use std::str::FromStr;
///
/// let format = ExportFormat::from_str("png").unwrap();
/// assert_eq!(format.extension(), "png");
/// assert!(ExportFormat::from_str("gif").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Single-page paginated document
    #[default]
    Pdf,
    /// Lossless raster capture
    Png,
    /// Lossy raster capture honoring the configured quality
    Jpg,
}

impl ExportFormat {
    /// All supported formats, in the order they are listed to users
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Png, ExportFormat::Jpg];

    /// File extension, also the name handed to the rendering harness
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
        }
    }

    /// Whether the format is a raster screenshot
    pub fn is_raster(&self) -> bool {
        !matches!(self, ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ExportFormat::Pdf),
            "png" => Ok(ExportFormat::Png),
            "jpg" => Ok(ExportFormat::Jpg),
            _ => Err(format!(
                "Invalid format value given: '{s}'. Must be one of: pdf, png, jpg"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_formats() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_str(format.extension()).unwrap(), format);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_mixed_case() {
        assert!(ExportFormat::from_str("gif").is_err());
        assert!(ExportFormat::from_str("jpeg").is_err());
        assert!(ExportFormat::from_str("PNG").is_err());
        assert!(ExportFormat::from_str("").is_err());
    }

    #[test]
    fn test_default_is_pdf() {
        assert_eq!(ExportFormat::default(), ExportFormat::Pdf);
        assert!(!ExportFormat::Pdf.is_raster());
        assert!(ExportFormat::Jpg.is_raster());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ExportFormat::Jpg).unwrap();
        assert_eq!(json, "\"jpg\"");
        let parsed: ExportFormat = serde_json::from_str("\"png\"").unwrap();
        assert_eq!(parsed, ExportFormat::Png);
    }
}
