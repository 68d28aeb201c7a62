//! Document-export collaborator interface.

use std::future::Future;

use image::DynamicImage;

use crate::sheet::SheetError;

/// Renders a spreadsheet tab to a raster image.
///
/// Implemented by the Google adapter crate; tests use in-memory fakes.
pub trait SnapshotExporter: Send + Sync {
    /// Exports the tab with this internal id and rasterizes its first page.
    ///
    /// Fails with `SheetError::NoPages` when the export has no pages.
    fn render_first_page(
        &self,
        tab_id: i64,
    ) -> impl Future<Output = Result<DynamicImage, SheetError>> + Send;
}
