//! Transaction resolution and settlement rendering.

use super::types::{
    AMOUNT_COLUMN, LookupEntry, RECEIVER_COLUMN, RECEIVER_CONTACT_COLUMN, RawRow, SENDER_COLUMN,
    SENDER_CONTACT_COLUMN, Settlement, Transaction,
};

/// Resolves ledger rows into transactions and a settlement message.
///
/// Rules, in row order:
/// - the first all-blank row ends the table; nothing after it is read
/// - a blank `Sender` reuses the last named sender
/// - a known sender is shown as `@alias` from the lookup table
/// - rows without a `Receiver` are skipped, after updating the last sender
/// - missing contact and amount columns read as `N/A`
///
/// # Example
///
/// ```
/// use ledgerbot_core::ledger::{LookupEntry, RawRow, resolve};
///
/// let rows = vec![
///     RawRow::new()
///         .with("Sender", "Alice")
///         .with("Receiver", "Bob")
///         .with("Amount", "10")
///         .with("Receiver Venmo", "@bobvenmo"),
/// ];
/// let lookup = vec![LookupEntry::new("alice", "alicetag")];
///
/// let settlement = resolve(&rows, &lookup);
/// assert_eq!(
///     settlement.message,
///     "@alicetag owes Bob $10 (Payment Info: @bobvenmo)."
/// );
/// ```
#[must_use]
pub fn resolve(rows: &[RawRow], lookup: &[LookupEntry]) -> Settlement {
    let mut transactions = Vec::new();
    let mut last_sender: Option<&str> = None;

    for row in rows {
        if row.is_blank() {
            break;
        }

        if let Some(sender) = row.non_blank(SENDER_COLUMN) {
            last_sender = Some(sender);
        }
        let sender_name = last_sender.map(|sender| display_name(sender, lookup));

        let Some(receiver) = row.non_blank(RECEIVER_COLUMN) else {
            continue;
        };

        transactions.push(Transaction {
            sender_name,
            sender_contact: row.get_or_missing(SENDER_CONTACT_COLUMN),
            amount: row.get_or_missing(AMOUNT_COLUMN),
            receiver_name: receiver.to_string(),
            receiver_contact: row.get_or_missing(RECEIVER_CONTACT_COLUMN),
        });
    }

    let message = render_message(&transactions);
    Settlement {
        message,
        transactions,
    }
}

/// Joins one rendered line per transaction with newlines.
#[must_use]
pub fn render_message(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(Transaction::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrites a sender to `@alias` when the first matching lookup entry has one.
fn display_name(sender: &str, lookup: &[LookupEntry]) -> String {
    lookup
        .iter()
        .find(|entry| entry.matches(sender))
        .map(|entry| entry.alias.as_str())
        .filter(|alias| !alias.trim().is_empty())
        .map_or_else(|| sender.to_string(), |alias| format!("@{alias}"))
}
