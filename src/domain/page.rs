//! Diagram pages and the document that holds them

use serde::{Deserialize, Serialize};
use std::fmt;

/// One exportable diagram page
///
/// `index` is the page's position in the document and the only key used for
/// selection. `name` is taken verbatim from the document; it may be empty or
/// shared by several pages and only feeds the output file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    /// Zero-based position in document order
    pub index: usize,

    /// Display name (possibly empty)
    pub name: String,
}

impl Page {
    /// Creates a new page
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} '{}'", self.index, self.name)
    }
}

/// A loaded diagram document
///
/// Holds the raw markup (handed unchanged to the rendering harness) together
/// with the page list extracted from it. Immutable once built.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    pages: Vec<Page>,
}

impl Document {
    /// Builds a document from its raw text and extracted pages
    pub fn from_parts(source: String, pages: Vec<Page>) -> Self {
        Self { source, pages }
    }

    /// Raw document text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Pages in document order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_display() {
        let page = Page::new(2, "Overview");
        assert_eq!(page.to_string(), "#2 'Overview'");
    }

    #[test]
    fn test_document_accessors() {
        let doc = Document::from_parts(
            "<mxfile/>".to_string(),
            vec![Page::new(0, "a"), Page::new(1, "")],
        );
        assert_eq!(doc.source(), "<mxfile/>");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages()[1].name, "");
    }
}
