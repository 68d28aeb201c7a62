//! Conversions from raw range reads to ledger inputs.

use crate::ledger::{LookupEntry, RawRow};

use super::error::SheetError;
use super::ports::{Grid, TabInfo};

/// Lookup table column holding the payment handle.
const HANDLE_COLUMN: usize = 0;
/// Lookup table column holding the chat alias.
const ALIAS_COLUMN: usize = 2;

/// Finds a tab by case-insensitive exact title. First match wins.
///
/// # Errors
///
/// Returns `SheetError::NotFound` when no title matches.
pub fn find_tab<'a>(tabs: &'a [TabInfo], title: &str) -> Result<&'a TabInfo, SheetError> {
    let wanted = title.to_lowercase();
    tabs.iter()
        .find(|tab| tab.title.to_lowercase() == wanted)
        .ok_or_else(|| SheetError::not_found(title))
}

/// Turns a grid with a header row into ledger rows.
///
/// Cells beyond the last header are ignored; headers beyond the end of a
/// short row map to `None`.
#[must_use]
pub fn rows_from_grid(grid: &Grid) -> Vec<RawRow> {
    let Some((headers, body)) = grid.split_first() else {
        return Vec::new();
    };

    body.iter()
        .map(|cells| {
            let mut row = RawRow::new();
            for (i, header) in headers.iter().enumerate() {
                row.insert(header.clone(), cells.get(i).cloned());
            }
            row
        })
        .collect()
}

/// Turns the lookup tab grid into lookup entries, skipping its header row.
#[must_use]
pub fn lookup_from_grid(grid: &Grid) -> Vec<LookupEntry> {
    grid.iter()
        .skip(1)
        .filter_map(|cells| {
            let handle = cells.get(HANDLE_COLUMN)?;
            let alias = cells.get(ALIAS_COLUMN).cloned().unwrap_or_default();
            Some(LookupEntry::new(handle.clone(), alias))
        })
        .collect()
}

/// Builds an A1 reference like `'March 3'!N1:T27`, escaping quotes.
#[must_use]
pub fn a1_range(tab_title: &str, range: &str) -> String {
    format!("'{}'!{range}", tab_title.replace('\'', "''"))
}
