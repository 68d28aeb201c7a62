//! Spreadsheet collaborator interface.

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::error::SheetError;

/// Cell text grid as returned by a range read.
///
/// Rows may be ragged: trailing empty cells are not returned.
pub type Grid = Vec<Vec<String>>;

/// A tab's title and internal id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    /// Display title.
    pub title: String,
    /// Internal id (the `gid` used by exports).
    pub id: i64,
}

impl TabInfo {
    /// Creates tab metadata.
    #[must_use]
    pub fn new(title: impl Into<String>, id: i64) -> Self {
        Self {
            title: title.into(),
            id,
        }
    }
}

/// Spreadsheet access.
///
/// Implemented by the Google adapter crate; tests use in-memory fakes.
pub trait SpreadsheetBackend: Send + Sync {
    /// Lists every tab in the spreadsheet.
    fn list_tabs(&self) -> impl Future<Output = Result<Vec<TabInfo>, SheetError>> + Send;

    /// Reads an A1 range (e.g. `N1:T27`) from the tab with this exact title.
    fn read_range(
        &self,
        tab_title: &str,
        range: &str,
    ) -> impl Future<Output = Result<Grid, SheetError>> + Send;
}
