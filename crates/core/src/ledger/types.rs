//! Ledger domain types.
//!
//! Spreadsheet rows have no fixed schema, so a row is kept as an ordered
//! map from header to optional cell text and defaulted only when a
//! [`Transaction`] is built from it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column holding the payer's name.
pub const SENDER_COLUMN: &str = "Sender";
/// Column holding the payer's payment handle.
pub const SENDER_CONTACT_COLUMN: &str = "Sender Venmo";
/// Column holding the owed amount.
pub const AMOUNT_COLUMN: &str = "Amount";
/// Column holding the payee's name.
pub const RECEIVER_COLUMN: &str = "Receiver";
/// Column holding the payee's payment handle.
pub const RECEIVER_CONTACT_COLUMN: &str = "Receiver Venmo";

/// Placeholder for a missing cell.
pub const MISSING_VALUE: &str = "N/A";

/// One sheet row keyed by the header row.
///
/// A header with no matching cell (the Sheets API drops trailing empty
/// cells) maps to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: IndexMap<String, Option<String>>,
}

impl RawRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell. The first value for a repeated header is kept.
    pub fn insert(&mut self, header: impl Into<String>, value: Option<String>) {
        self.cells.entry(header.into()).or_insert(value);
    }

    /// Builder-style [`RawRow::insert`] for a present cell.
    #[must_use]
    pub fn with(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(header, Some(value.into()));
        self
    }

    /// Returns `true` if the row has this header at all.
    #[must_use]
    pub fn has_column(&self, header: &str) -> bool {
        self.cells.contains_key(header)
    }

    /// Returns the cell text, if the column exists and holds a value.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).and_then(|v| v.as_deref())
    }

    /// Returns the cell text if it holds anything besides whitespace.
    #[must_use]
    pub fn non_blank(&self, header: &str) -> Option<&str> {
        self.get(header).filter(|v| !v.trim().is_empty())
    }

    /// Returns the cell text, or [`MISSING_VALUE`] when absent.
    #[must_use]
    pub fn get_or_missing(&self, header: &str) -> String {
        self.get(header).unwrap_or(MISSING_VALUE).to_string()
    }

    /// Returns `true` if every cell is absent, empty, or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells
            .values()
            .all(|v| v.as_deref().is_none_or(|s| s.trim().is_empty()))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (header, value) in iter {
            row.insert(header, Some(value.into()));
        }
        row
    }
}

/// A row of the identity lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    /// Payment handle as written in the ledger's `Sender` column.
    pub handle: String,
    /// Chat display tag, rendered as `@alias`.
    pub alias: String,
}

impl LookupEntry {
    /// Creates a lookup entry.
    #[must_use]
    pub fn new(handle: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            alias: alias.into(),
        }
    }

    /// Case-insensitive, whitespace-trimmed handle comparison.
    #[must_use]
    pub fn matches(&self, sender: &str) -> bool {
        self.handle.trim().to_lowercase() == sender.trim().to_lowercase()
    }
}

/// A resolved "who owes whom" record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Payer, alias-rewritten when the lookup table knows them.
    ///
    /// `None` only for rows that precede the first named sender.
    pub sender_name: Option<String>,
    /// Payer's payment handle.
    pub sender_contact: String,
    /// Owed amount as written in the sheet.
    pub amount: String,
    /// Payee. Never blank.
    pub receiver_name: String,
    /// Payee's payment handle.
    pub receiver_contact: String,
}

impl Transaction {
    /// Renders the settlement line for this transaction.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} owes {} ${} (Payment Info: {}).",
            self.sender_name.as_deref().unwrap_or(MISSING_VALUE),
            self.receiver_name,
            self.amount,
            self.receiver_contact
        )
    }
}

/// Output of the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settlement {
    /// One rendered line per transaction, newline separated.
    pub message: String,
    /// Transactions in sheet order.
    pub transactions: Vec<Transaction>,
}

impl Settlement {
    /// Returns `true` if nothing is owed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
