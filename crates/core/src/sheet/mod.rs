//! Spreadsheet access for ledger commands.
//!
//! This module provides:
//! - The spreadsheet collaborator trait and tab metadata
//! - The collaborator error taxonomy shown to chat users
//! - Tab lookup and grid conversions
//! - The ledger service composing fetch operations

mod error;
mod grid;
mod ports;
mod service;

pub use error::SheetError;
pub use grid::{a1_range, find_tab, lookup_from_grid, rows_from_grid};
pub use ports::{Grid, SpreadsheetBackend, TabInfo};
pub use service::LedgerService;
