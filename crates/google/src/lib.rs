//! Google adapters for Ledgerbot.
//!
//! This crate implements the core collaborator traits:
//! - Service-account token minting
//! - Sheets v4 tab listing and range reads
//! - PDF export of a tab and first-page rasterization

pub mod auth;
pub mod client;
pub mod export;
pub mod raster;
pub mod sheets;

pub use auth::{DRIVE_SCOPE, SHEETS_SCOPE, ServiceAccountKey, TokenProvider};
pub use client::GoogleClient;
pub use export::GoogleExporter;
pub use raster::PdfRasterizer;
pub use sheets::GoogleSheets;
