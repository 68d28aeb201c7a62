//! Ledger resolution.
//!
//! This module turns raw ledger rows into settlement records:
//! - Schema-free row and lookup types
//! - Transaction resolution with sender carry-forward and alias rewrite
//! - Settlement message rendering

pub mod resolver;
pub mod types;

#[cfg(test)]
mod resolver_props;

pub use resolver::{render_message, resolve};
pub use types::{
    AMOUNT_COLUMN, LookupEntry, MISSING_VALUE, RECEIVER_COLUMN, RECEIVER_CONTACT_COLUMN, RawRow,
    SENDER_COLUMN, SENDER_CONTACT_COLUMN, Settlement, Transaction,
};
