//! Typed render requests and page selection

use super::errors::BatchError;
use super::format::ExportFormat;
use super::result::Result;
use serde::Serialize;
use std::fmt;

/// Which pages of a document to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// The single page at this index
    Index(usize),
}

impl PageSelection {
    /// Builds a selection from the raw diagram id, where `-1` means all pages
    ///
    /// # Examples
    ///
    /// ```
    /// use drawio_batch::domain::PageSelection;
    ///
    /// assert_eq!(PageSelection::from_raw(-1).unwrap(), PageSelection::All);
    /// assert_eq!(PageSelection::from_raw(2).unwrap(), PageSelection::Index(2));
    /// assert!(PageSelection::from_raw(-2).is_err());
    /// ```
    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            -1 => Ok(PageSelection::All),
            n if n >= 0 => usize::try_from(n).map(PageSelection::Index).map_err(|_| {
                BatchError::ConfigValidation(format!("Invalid diagram-id value given: {n}"))
            }),
            n => Err(BatchError::ConfigValidation(format!(
                "Invalid diagram-id value given: {n}. Use -1 for all pages"
            ))),
        }
    }

    /// Selection predicate: page `index` is exported iff this returns true
    pub fn includes(&self, index: usize) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Index(selected) => *selected == index,
        }
    }
}

impl fmt::Display for PageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSelection::All => f.write_str("all"),
            PageSelection::Index(i) => write!(f, "{i}"),
        }
    }
}

/// A single render call against the harness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    format: ExportFormat,
    scale: f64,
    page_index: usize,
}

impl RenderRequest {
    /// Creates a request, rejecting non-positive or non-finite scales
    pub fn new(format: ExportFormat, scale: f64, page_index: usize) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(BatchError::ConfigValidation(format!(
                "Invalid scale value given: {scale}"
            )));
        }
        Ok(Self {
            format,
            scale,
            page_index,
        })
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Argument object handed to the harness `render` function
    pub fn harness_args<'a>(&self, xml: &'a str) -> HarnessArgs<'a> {
        HarnessArgs {
            xml,
            format: self.format,
            scale: self.scale,
            from: self.page_index,
        }
    }
}

/// Wire shape of the harness `render({xml, format, scale, from})` argument
#[derive(Debug, Clone, Serialize)]
pub struct HarnessArgs<'a> {
    pub xml: &'a str,
    pub format: ExportFormat,
    pub scale: f64,
    pub from: usize,
}
