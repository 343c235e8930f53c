//! Output resolver - maps pages to artifact paths
//!
//! Paths are `<root>/<page name>.<extension>`, built by plain concatenation.
//! There is no collision detection: two pages sharing a name resolve to the
//! same path and the later export overwrites the earlier one. A name that
//! walks out of the root through `..` is refused for that page.

use crate::domain::{BatchError, ExportFormat, Result};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Resolves artifact destinations below an output root
#[derive(Debug, Clone)]
pub struct OutputResolver {
    root: PathBuf,
}

impl OutputResolver {
    /// Creates a resolver for the given output root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination path for a page
    ///
    /// # Examples
    ///
    /// ```
    /// use drawio_batch::core::output::OutputResolver;
    /// use drawio_batch::domain::ExportFormat;
    /// use std::path::PathBuf;
    ///
    /// let resolver = OutputResolver::new("out");
    /// assert_eq!(resolver.resolve("Page-1", ExportFormat::Png), PathBuf::from("out/Page-1.png"));
    /// // Unnamed pages produce a dot-file
    /// assert_eq!(resolver.resolve("", ExportFormat::Pdf), PathBuf::from("out/.pdf"));
    /// ```
    pub fn resolve(&self, page_name: &str, format: ExportFormat) -> PathBuf {
        // Not Path::join: an absolute-looking page name must stay under the root
        let mut path = OsString::from(self.root.as_os_str());
        path.push("/");
        path.push(page_name);
        path.push(".");
        path.push(format.extension());
        PathBuf::from(path)
    }

    /// Creates the output root if it does not exist yet
    ///
    /// Idempotent: an existing directory is not an error.
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            BatchError::Io(format!(
                "Failed to create output directory {}: {}",
                self.root.display(),
                e
            ))
        })?;
        tracing::debug!(root = %self.root.display(), "Output directory ready");
        Ok(())
    }

    /// Creates the parent directory of a resolved path
    ///
    /// Page names containing `/` resolve below nested folders of the root.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Capture`] if the path leaves the root through a
    /// `..` component or the directory cannot be created. Nothing is created in
    /// the first case.
    pub async fn ensure_parent(&self, path: &Path) -> Result<()> {
        let relative = path.strip_prefix(&self.root).map_err(|_| {
            BatchError::Capture(format!(
                "{} is not below output directory {}",
                path.display(),
                self.root.display()
            ))
        })?;
        if relative.components().any(|c| c == Component::ParentDir) {
            return Err(BatchError::Capture(format!(
                "Page name escapes output directory: {}",
                relative.display()
            )));
        }

        match path.parent() {
            Some(parent) if parent != self.root && !parent.as_os_str().is_empty() => {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    BatchError::Capture(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })
            }
            _ => Ok(()),
        }
    }
}
