//! Export coordinator - main orchestrator for the export process
//!
//! This module drives a whole run: it selects pages, owns the single render
//! session, walks the selected pages in ascending index order and collects the
//! outcome of each into an [`ExportSummary`].

use crate::adapters::browser::EnvironmentLauncher;
use crate::config::{ExportOptions, FailurePolicy};
use crate::core::export::summary::{ExportSummary, PageFailure};
use crate::core::output::OutputResolver;
use crate::core::session::{RenderSession, SessionOptions};
use crate::domain::{Artifact, BatchError, Document, Page, Result};
use crate::{log_page_exported, log_page_failed};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    launcher: Arc<dyn EnvironmentLauncher>,
    session_options: SessionOptions,
    shutdown: Option<watch::Receiver<bool>>,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    pub fn new(launcher: Arc<dyn EnvironmentLauncher>, session_options: SessionOptions) -> Self {
        Self {
            launcher,
            session_options,
            shutdown: None,
        }
    }

    /// Stop scheduling pages once the receiver flips to `true`
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Export the selected pages of `document` into `output`
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Selects pages (all, or the single requested index)
    /// 2. Opens the render session; nothing is written if that fails
    /// 3. Creates the output directory
    /// 4. For each selected page, in order:
    ///    - Resolves the destination path
    ///    - Renders the page and writes the artifact
    ///    - Records success or failure per the failure policy; an error
    ///      that is not scoped to the page stops the run regardless
    /// 5. Closes the session on every path
    ///
    /// A selection that matches no page still creates the output directory
    /// but never launches the environment.
    ///
    /// # Errors
    ///
    /// Run-level failures are returned as errors: launching the environment
    /// and creating the output directory. Page-level failures are recorded
    /// in the summary instead.
    pub async fn run(
        &self,
        document: &Document,
        options: &ExportOptions,
        output: &OutputResolver,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let selection = options.selection();
        let selected: Vec<&Page> = document
            .pages()
            .iter()
            .filter(|page| selection.includes(page.index))
            .collect();

        let mut summary = ExportSummary::new(document.page_count(), selected.len());

        tracing::info!(
            total_pages = document.page_count(),
            selected_pages = selected.len(),
            selection = %selection,
            format = %options.format(),
            scale = options.scale(),
            output = %output.root().display(),
            "Starting export"
        );

        if selected.is_empty() {
            output.ensure_dir().await?;
            tracing::warn!(selection = %selection, "No page matches the selection");
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        let mut session =
            RenderSession::open(self.launcher.as_ref(), self.session_options.clone()).await?;
        if let Some(shutdown) = &self.shutdown {
            session = session.with_shutdown(shutdown.clone());
        }

        if let Err(e) = output.ensure_dir().await {
            close_session(session).await;
            return Err(e);
        }

        for (position, page) in selected.iter().enumerate() {
            if self.shutdown_requested() {
                summary.interrupted = true;
                summary.skipped_pages = selected.len() - position;
                tracing::warn!(page = page.index, "Shutdown requested, stopping export");
                break;
            }

            match export_page(&mut session, document, page, options, output).await {
                Ok(artifact) => {
                    log_page_exported!(&artifact);
                    summary.add_artifact(artifact);
                }
                Err(BatchError::Interrupted) => {
                    summary.interrupted = true;
                    summary.skipped_pages = selected.len() - position;
                    tracing::warn!(page = page.index, "Export interrupted mid-page");
                    break;
                }
                Err(e) => {
                    log_page_failed!(page, &e);
                    summary.add_failure(PageFailure::new((*page).clone(), &e));

                    // The environment itself is unusable, later pages would fail too
                    let environment_lost = !e.is_page_scoped();
                    if environment_lost || options.failure_policy() == FailurePolicy::FailFast {
                        summary.skipped_pages = selected.len() - position - 1;
                        tracing::warn!(
                            skipped = summary.skipped_pages,
                            environment_lost,
                            "Stopping after failure"
                        );
                        break;
                    }
                }
            }
        }

        close_session(session).await;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }
}

/// Render one page and write its artifact
async fn export_page(
    session: &mut RenderSession,
    document: &Document,
    page: &Page,
    options: &ExportOptions,
    output: &OutputResolver,
) -> Result<Artifact> {
    let format = options.format();
    let path = output.resolve(&page.name, format);

    println!("Exporting page {}: {}", page.index, path.display());
    tracing::info!(page = page.index, path = %path.display(), "Exporting page");

    output.ensure_parent(&path).await?;

    let bounds = session
        .render_page(document.source(), page.index, format, options.scale())
        .await?;

    session
        .materialize(page, format, &bounds, options.quality(), &path)
        .await
}

async fn close_session(session: RenderSession) {
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Failed to close render session cleanly");
    }
}
