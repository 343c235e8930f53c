//! Files produced by the exporter

use super::format::ExportFormat;
use super::page::Page;
use std::path::PathBuf;

/// An exported page written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// Page the artifact was produced from
    pub page: Page,

    /// Format the artifact was written in
    pub format: ExportFormat,

    /// Destination path
    pub path: PathBuf,

    /// Number of bytes written
    pub bytes: usize,
}
