//! Ledger service composing the collaborator fetches.

use std::sync::Arc;

use ledgerbot_shared::SheetConfig;
use tracing::debug;

use super::error::SheetError;
use super::grid::{find_tab, lookup_from_grid, rows_from_grid};
use super::ports::{SpreadsheetBackend, TabInfo};
use crate::ledger::{Settlement, resolve};
use crate::snapshot::{CropBox, SnapshotExporter, crop_png};

/// Fetch operations behind the ledger commands.
///
/// Each call re-reads the spreadsheet; nothing is cached between calls.
pub struct LedgerService<B: SpreadsheetBackend, E: SnapshotExporter> {
    backend: Arc<B>,
    exporter: Arc<E>,
    layout: SheetConfig,
    crop: CropBox,
}

impl<B: SpreadsheetBackend, E: SnapshotExporter> LedgerService<B, E> {
    /// Create a new ledger service.
    #[must_use]
    pub fn new(backend: Arc<B>, exporter: Arc<E>, layout: SheetConfig, crop: CropBox) -> Self {
        Self {
            backend,
            exporter,
            layout,
            crop,
        }
    }

    /// Finds the tab whose title matches, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::NotFound` if no tab matches, or the backend's error.
    pub async fn resolve_tab(&self, title: &str) -> Result<TabInfo, SheetError> {
        let tabs = self.backend.list_tabs().await?;
        find_tab(&tabs, title).cloned()
    }

    /// Reads the pre-computed summary cell of a tab.
    ///
    /// Cells of the first returned row are concatenated without separator.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::EmptyData` if the summary range is empty.
    pub async fn fetch_summary(&self, title: &str) -> Result<String, SheetError> {
        let tab = self.resolve_tab(title).await?;
        let grid = self
            .backend
            .read_range(&tab.title, &self.layout.summary_range)
            .await?;

        let first = grid.into_iter().next().ok_or(SheetError::EmptyData)?;
        debug!(tab = %tab.title, cells = first.len(), "Fetched summary");
        Ok(first.concat())
    }

    /// Renders the tab and crops the ledger box out of its first page.
    ///
    /// # Errors
    ///
    /// Returns the exporter's error, or `SheetError::Render` if cropping fails.
    pub async fn fetch_snapshot(&self, title: &str) -> Result<Vec<u8>, SheetError> {
        let tab = self.resolve_tab(title).await?;
        let page = self.exporter.render_first_page(tab.id).await?;
        debug!(
            tab = %tab.title,
            width = page.width(),
            height = page.height(),
            "Rendered snapshot page"
        );
        crop_png(&page, self.crop)
    }

    /// Reads the ledger table and lookup tab and resolves who owes whom.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::EmptyData` if either range is empty.
    pub async fn fetch_settlement(&self, title: &str) -> Result<Settlement, SheetError> {
        let tab = self.resolve_tab(title).await?;

        let ledger = self
            .backend
            .read_range(&tab.title, &self.layout.ledger_range)
            .await?;
        if ledger.is_empty() {
            return Err(SheetError::EmptyData);
        }

        let lookup = self
            .backend
            .read_range(&self.layout.lookup_tab, &self.layout.lookup_range)
            .await?;
        if lookup.is_empty() {
            return Err(SheetError::EmptyData);
        }

        let settlement = resolve(&rows_from_grid(&ledger), &lookup_from_grid(&lookup));
        debug!(
            tab = %tab.title,
            transactions = settlement.transactions.len(),
            "Resolved settlement"
        );
        Ok(settlement)
    }
}
