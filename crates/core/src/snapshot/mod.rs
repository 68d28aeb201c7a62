//! Ledger snapshot images.
//!
//! A snapshot is the first page of a tab's PDF export, cut down to the
//! fixed box that holds the ledger table and re-encoded as PNG.

mod crop;
mod ports;

pub use crop::{CropBox, crop_png};
pub use ports::SnapshotExporter;
