//! Chat command gateway for Ledgerbot.
//!
//! This crate provides:
//! - Command parsing
//! - Ledger and ping commands
//! - The reply sink abstraction and its Discord implementation
//! - The serenity event handler

pub mod commands;
pub mod gateway;
pub mod handler;
pub mod reply;

pub use commands::{Command, Invocation};
pub use gateway::Gateway;
pub use handler::{Handler, LedgerGateway, ShardManagerContainer};
pub use reply::{ChannelSink, Reply, ReplySink};
