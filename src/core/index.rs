//! Document index - extracts the ordered page list from a diagram document
//!
//! A draw.io file is an `<mxfile>` element with one child element per page:
//!
//! ```xml
//! <mxfile host="app.diagrams.net">
//!   <diagram id="a1" name="Overview">...</diagram>
//!   <diagram id="b2" name="Details">...</diagram>
//! </mxfile>
//! ```
//!
//! Page content may be compressed or inline XML; it is never interpreted here,
//! only the direct children of the container are counted and named.

use crate::domain::{BatchError, Document, Page, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::Path;

/// Element holding one child per page
const PAGE_CONTAINER: &[u8] = b"mxfile";

/// Attribute carrying a page's display name
const NAME_ATTRIBUTE: &[u8] = b"name";

/// Lists the pages of a document in document order
///
/// The first `mxfile` element anywhere in the document is the page container.
/// Each direct child element becomes a page, indexed from 0. A missing or
/// empty `name` attribute yields an empty name.
///
/// # Errors
///
/// Returns [`BatchError::DocumentFormat`] if the text is not well-formed or
/// has no `mxfile` element.
///
/// # Examples
///
/// ```
/// use drawio_batch::core::index::list_pages;
///
/// let pages = list_pages(r#"<mxfile><diagram name="A"/><diagram name="B"/></mxfile>"#).unwrap();
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[1].index, 1);
/// assert_eq!(pages[1].name, "B");
/// ```
pub fn list_pages(xml: &str) -> Result<Vec<Page>> {
    let mut reader = Reader::from_str(xml);

    let mut pages = Vec::new();
    let mut depth = 0usize;
    // Depth of the container element once seen; its pages live at depth + 1
    let mut container_depth: Option<usize> = None;
    let mut container_closed = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                depth += 1;
                if container_depth.is_none() && is_container(&element) {
                    container_depth = Some(depth);
                } else if !container_closed && container_depth == Some(depth - 1) {
                    pages.push(page_from_element(pages.len(), &element)?);
                }
            }
            Event::Empty(element) => {
                let level = depth + 1;
                if container_depth.is_none() && is_container(&element) {
                    container_depth = Some(level);
                    container_closed = true;
                } else if !container_closed && container_depth == Some(depth) {
                    pages.push(page_from_element(pages.len(), &element)?);
                }
            }
            Event::End(_) => {
                if container_depth == Some(depth) {
                    container_closed = true;
                }
                depth = depth.checked_sub(1).ok_or_else(|| {
                    BatchError::DocumentFormat("unexpected closing tag".to_string())
                })?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(BatchError::DocumentFormat(format!(
            "unexpected end of document, {depth} element(s) left open"
        )));
    }

    if container_depth.is_none() {
        return Err(BatchError::DocumentFormat(
            "missing <mxfile> page container".to_string(),
        ));
    }

    tracing::debug!(page_count = pages.len(), "Indexed document pages");
    Ok(pages)
}

/// Parses raw document text into a [`Document`]
pub fn parse_document(source: String) -> Result<Document> {
    let pages = list_pages(&source)?;
    Ok(Document::from_parts(source, pages))
}

/// Reads and indexes a document from disk
///
/// # Errors
///
/// Returns [`BatchError::Io`] if the file cannot be read as UTF-8 text and
/// [`BatchError::DocumentFormat`] if it cannot be indexed.
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let source = tokio::fs::read_to_string(path).await.map_err(|e| {
        BatchError::Io(format!("Failed to read input file {}: {}", path.display(), e))
    })?;

    let document = parse_document(source)?;
    tracing::info!(
        path = %path.display(),
        pages = document.page_count(),
        "Loaded diagram document"
    );
    Ok(document)
}

fn is_container(element: &BytesStart<'_>) -> bool {
    element.name().as_ref() == PAGE_CONTAINER
}

fn page_from_element(index: usize, element: &BytesStart<'_>) -> Result<Page> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == NAME_ATTRIBUTE {
            let name = attr
                .unescape_value()
                .map_err(|e| BatchError::DocumentFormat(format!("bad page name: {e}")))?;
            return Ok(Page::new(index, name.into_owned()));
        }
    }
    Ok(Page::new(index, String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(pages: &[Page]) -> Vec<&str> {
        pages.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_lists_pages_in_document_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<mxfile host="app.diagrams.net" version="21.0.0">
  <diagram id="a" name="Page-1">7VhNc9owEP01PsL4Aww5xg5pOtPOdIZDm6NiC1uNbLmyCNBf35UlfyGgTkMyPSQH0D7trrVvtU+yHS/Mdp84KtKvLMbUcadlevLiOe7d9OcwcOa8Sz+DLD9gAzRAAJzs9mP/W8Fzx1mPH/bCaFc9wbFHFBj2ziEn1BmwRHixYwA3v2wfPL7P/9WDz0kAwcdv76mSzMHFhUz9rbq/WNu/2gDrhB66XfMKhb6+9v0n3xwL94j5xC82+PdrQN+o6e7+fSRttpDq6OgGqzuPAIbnKDeWvfT8/xEj43ze3IN</diagram>
  <diagram id="b" name="Page-2"><mxGraphModel><root><mxCell id="0"/></root></mxGraphModel></diagram>
  <diagram id="c" name="Summary"/>
</mxfile>"#;

        let pages = list_pages(xml).unwrap();
        assert_eq!(names(&pages), vec!["Page-1", "Page-2", "Summary"]);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.index, i);
        }
    }

    #[test]
    fn test_page_count_matches_child_count() {
        for n in [0usize, 1, 5, 40] {
            let children: String = (0..n)
                .map(|i| format!(r#"<diagram name="d{i}"><mxGraphModel/></diagram>"#))
                .collect();
            let xml = format!("<mxfile>{children}</mxfile>");
            let pages = list_pages(&xml).unwrap();
            assert_eq!(pages.len(), n);
            assert!(pages.iter().enumerate().all(|(i, p)| p.index == i));
        }
    }

    #[test]
    fn test_missing_name_yields_empty_string() {
        let xml = r#"<mxfile><diagram id="x"/><diagram name=""/><diagram name="Named"/></mxfile>"#;
        let pages = list_pages(xml).unwrap();
        assert_eq!(names(&pages), vec!["", "", "Named"]);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let xml = r#"<mxfile><diagram name="Page-1"/><diagram name="Page-1"/><diagram name="Page-2"/></mxfile>"#;
        let pages = list_pages(xml).unwrap();
        assert_eq!(names(&pages), vec!["Page-1", "Page-1", "Page-2"]);
        assert_eq!(pages[1].index, 1);
    }

    #[test]
    fn test_names_are_unescaped() {
        let xml = r#"<mxfile><diagram name="R&amp;D &lt;draft&gt;"/></mxfile>"#;
        let pages = list_pages(xml).unwrap();
        assert_eq!(pages[0].name, "R&D <draft>");
    }

    #[test]
    fn test_container_may_be_nested() {
        let xml = r#"<wrapper><meta a="1"/><mxfile><diagram name="inner"/></mxfile></wrapper>"#;
        let pages = list_pages(xml).unwrap();
        assert_eq!(names(&pages), vec!["inner"]);
    }

    #[test]
    fn test_grandchildren_and_text_are_not_pages() {
        let xml = r#"<mxfile>
            text
            <!-- comment -->
            <diagram name="one"><diagram name="nested"/></diagram>
        </mxfile>"#;
        let pages = list_pages(xml).unwrap();
        assert_eq!(names(&pages), vec!["one"]);
    }

    #[test]
    fn test_only_first_container_counts() {
        let xml = r#"<root><mxfile><diagram name="a"/></mxfile><mxfile><diagram name="b"/></mxfile></root>"#;
        let pages = list_pages(xml).unwrap();
        assert_eq!(names(&pages), vec!["a"]);
    }

    #[test]
    fn test_empty_container() {
        assert!(list_pages("<mxfile/>").unwrap().is_empty());
        assert!(list_pages("<mxfile></mxfile>").unwrap().is_empty());
    }

    #[test]
    fn test_missing_container_is_format_error() {
        let err = list_pages(r#"<graph><diagram name="a"/></graph>"#).unwrap_err();
        assert!(matches!(err, BatchError::DocumentFormat(_)));

        let err = list_pages("").unwrap_err();
        assert!(matches!(err, BatchError::DocumentFormat(_)));
    }

    #[test]
    fn test_malformed_markup_is_format_error() {
        let inputs = [
            "<mxfile><diagram name=\"a\"></mxfile>",
            "<mxfile><diagram name=\"a\">",
            "<mxfile><diagram name=a/></mxfile>",
            "</mxfile>",
        ];
        for input in inputs {
            let err = list_pages(input).unwrap_err();
            assert!(
                matches!(err, BatchError::DocumentFormat(_)),
                "expected format error for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_document_keeps_source() {
        let source = r#"<mxfile><diagram name="a"/></mxfile>"#.to_string();
        let document = parse_document(source.clone()).unwrap();
        assert_eq!(document.source(), source);
        assert_eq!(document.page_count(), 1);
    }

    #[tokio::test]
    async fn test_load_document_missing_file() {
        let err = load_document("/nonexistent/drawing.drawio").await.unwrap_err();
        assert!(matches!(err, BatchError::Io(_)));
    }
}
