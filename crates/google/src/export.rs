//! Spreadsheet PDF export adapter.

use std::sync::Arc;

use image::DynamicImage;
use ledgerbot_core::sheet::SheetError;
use ledgerbot_core::snapshot::SnapshotExporter;
use tracing::debug;

use crate::auth::DRIVE_SCOPE;
use crate::client::GoogleClient;
use crate::raster::PdfRasterizer;

const DOCS_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Exports a tab as PDF and rasterizes its first page.
#[derive(Debug, Clone)]
pub struct GoogleExporter {
    client: Arc<GoogleClient>,
    rasterizer: PdfRasterizer,
}

impl GoogleExporter {
    /// Creates the adapter.
    #[must_use]
    pub fn new(client: Arc<GoogleClient>, rasterizer: PdfRasterizer) -> Self {
        Self { client, rasterizer }
    }

    /// Downloads the PDF export of one tab.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Export` on a non-200 response.
    pub async fn export_pdf(&self, tab_id: i64) -> Result<bytes::Bytes, SheetError> {
        let url = export_url(self.client.spreadsheet_id(), tab_id);
        let response = self.client.get(&url, DRIVE_SCOPE).await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::export(status.as_u16(), body));
        }

        let pdf = response
            .bytes()
            .await
            .map_err(|e| SheetError::http(e.to_string()))?;
        debug!(tab_id, bytes = pdf.len(), "Exported PDF");
        Ok(pdf)
    }
}

impl SnapshotExporter for GoogleExporter {
    async fn render_first_page(&self, tab_id: i64) -> Result<DynamicImage, SheetError> {
        let pdf = self.export_pdf(tab_id).await?;
        self.rasterizer.first_page(&pdf).await
    }
}

fn export_url(spreadsheet_id: &str, tab_id: i64) -> String {
    format!("{DOCS_BASE}/{spreadsheet_id}/export?format=pdf&gid={tab_id}")
}
