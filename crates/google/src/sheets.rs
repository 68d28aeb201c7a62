//! Google Sheets v4 adapter.

use std::sync::Arc;

use ledgerbot_core::sheet::{Grid, SheetError, SpreadsheetBackend, TabInfo, a1_range};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::auth::SHEETS_SCOPE;
use crate::client::GoogleClient;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4";

#[derive(Debug, Default, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct SheetEntry {
    #[serde(default)]
    properties: SheetProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Spreadsheet backend over the Sheets REST API.
#[derive(Debug, Clone)]
pub struct GoogleSheets {
    client: Arc<GoogleClient>,
}

impl GoogleSheets {
    /// Creates the adapter.
    #[must_use]
    pub fn new(client: Arc<GoogleClient>) -> Self {
        Self { client }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, SheetError> {
        let response = self.client.get(url, SHEETS_SCOPE).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::http(format!("{} {body}", status.as_u16())));
        }
        response
            .json()
            .await
            .map_err(|e| SheetError::http(e.to_string()))
    }
}

impl SpreadsheetBackend for GoogleSheets {
    async fn list_tabs(&self) -> Result<Vec<TabInfo>, SheetError> {
        let url = metadata_url(self.client.spreadsheet_id());
        let metadata: SpreadsheetMetadata = self.get_json(&url).await?;
        let tabs = tabs_from_metadata(metadata);
        debug!(count = tabs.len(), "Listed tabs");
        Ok(tabs)
    }

    async fn read_range(&self, tab_title: &str, range: &str) -> Result<Grid, SheetError> {
        let url = values_url(self.client.spreadsheet_id(), &a1_range(tab_title, range));
        let values: ValueRange = self.get_json(&url).await?;
        let grid = grid_from_values(values);
        debug!(tab = tab_title, range, rows = grid.len(), "Read range");
        Ok(grid)
    }
}

fn metadata_url(spreadsheet_id: &str) -> String {
    format!("{SHEETS_API}/spreadsheets/{spreadsheet_id}?fields=sheets.properties(sheetId,title)")
}

fn values_url(spreadsheet_id: &str, a1: &str) -> String {
    format!(
        "{SHEETS_API}/spreadsheets/{spreadsheet_id}/values/{}",
        urlencoding::encode(a1)
    )
}

fn tabs_from_metadata(metadata: SpreadsheetMetadata) -> Vec<TabInfo> {
    metadata
        .sheets
        .into_iter()
        .map(|entry| TabInfo::new(entry.properties.title, entry.properties.sheet_id))
        .collect()
}

fn grid_from_values(range: ValueRange) -> Grid {
    range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect()
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
