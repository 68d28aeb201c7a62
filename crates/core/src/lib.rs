//! Core logic for Ledgerbot.
//!
//! This crate contains the ledger rules and the collaborator interfaces,
//! with ZERO network or chat dependencies.
//!
//! # Modules
//!
//! - `ledger` - Transaction resolution and settlement rendering
//! - `sheet` - Spreadsheet collaborator port, errors, and fetch service
//! - `snapshot` - Export collaborator port and fixed-box crop
//! - `cooldown` - Per-channel command rate limiting

pub mod cooldown;
pub mod ledger;
pub mod sheet;
pub mod snapshot;
