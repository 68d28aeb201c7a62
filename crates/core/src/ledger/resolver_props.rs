//! Property-based tests for ledger resolution.

use proptest::prelude::*;

use super::resolver::resolve;
use super::types::{LookupEntry, RawRow};

/// Strategy for a cell that is never blank.
fn name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,8}"
}

/// Strategy for a cell that may be blank.
fn maybe_blank() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("  ".to_string()), name()]
}

/// Strategy for a row that always has a receiver.
fn filled_row() -> impl Strategy<Value = RawRow> {
    (maybe_blank(), name(), "[0-9]{1,4}").prop_map(|(sender, receiver, amount)| {
        RawRow::new()
            .with("Sender", sender)
            .with("Receiver", receiver)
            .with("Amount", amount)
    })
}

fn blank_row() -> RawRow {
    RawRow::new()
        .with("Sender", "")
        .with("Receiver", " ")
        .with("Amount", "")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Nothing after the first blank row is ever emitted.
    #[test]
    fn prop_blank_row_is_a_hard_stop(
        head in prop::collection::vec(filled_row(), 0..8),
        tail in prop::collection::vec(filled_row(), 1..8),
    ) {
        let mut rows = head.clone();
        rows.push(blank_row());
        rows.extend(tail);

        let truncated = resolve(&rows, &[]);
        let head_only = resolve(&head, &[]);

        prop_assert_eq!(truncated, head_only);
    }

    /// One line per transaction, and every receiver is non-blank.
    #[test]
    fn prop_one_line_per_transaction(rows in prop::collection::vec(filled_row(), 0..12)) {
        let settlement = resolve(&rows, &[]);

        prop_assert_eq!(settlement.transactions.len(), rows.len());
        let line_count = if settlement.message.is_empty() {
            0
        } else {
            settlement.message.lines().count()
        };
        prop_assert_eq!(line_count, settlement.transactions.len());
        for tx in &settlement.transactions {
            prop_assert!(!tx.receiver_name.trim().is_empty());
        }
    }

    /// A transaction's sender is the nearest non-blank sender at or above it.
    #[test]
    fn prop_sender_carries_forward(rows in prop::collection::vec(filled_row(), 1..12)) {
        let settlement = resolve(&rows, &[]);

        let mut expected = None;
        for (row, tx) in rows.iter().zip(&settlement.transactions) {
            if let Some(sender) = row.non_blank("Sender") {
                expected = Some(sender.to_string());
            }
            prop_assert_eq!(&tx.sender_name, &expected);
        }
    }

    /// Lookup rewrite ignores case and surrounding whitespace.
    #[test]
    fn prop_lookup_rewrite_ignores_case(sender in name(), alias in name()) {
        let rows = vec![RawRow::new().with("Sender", sender.clone()).with("Receiver", "Bob")];
        let handle = format!("  {}  ", sender.to_uppercase());
        let lookup = vec![LookupEntry::new(handle, alias.clone())];

        let settlement = resolve(&rows, &lookup);

        prop_assert_eq!(
            settlement.transactions[0].sender_name.clone(),
            Some(format!("@{alias}"))
        );
    }
}
