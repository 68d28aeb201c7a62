//! Shared errors and configuration for Ledgerbot.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{
    AppConfig, CropConfig, DiscordConfig, GoogleConfig, SheetConfig, SnapshotConfig,
};
pub use error::{AppError, AppResult};
