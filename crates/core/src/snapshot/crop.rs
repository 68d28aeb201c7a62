//! Fixed-rectangle crop of a rendered page.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage, imageops};
use ledgerbot_shared::CropConfig;

use crate::sheet::SheetError;

/// Pixel rectangle, right and bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    /// Left edge.
    pub left: u32,
    /// Top edge.
    pub top: u32,
    /// Right edge.
    pub right: u32,
    /// Bottom edge.
    pub bottom: u32,
}

impl CropBox {
    /// Creates a crop box.
    #[must_use]
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Output width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Output height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

impl Default for CropBox {
    /// The ledger summary block on a 300 DPI page.
    fn default() -> Self {
        Self::new(2125, 373, 3900, 1700)
    }
}

impl From<CropConfig> for CropBox {
    fn from(config: CropConfig) -> Self {
        Self::new(config.left, config.top, config.right, config.bottom)
    }
}

/// Cuts `crop` out of `page` and encodes it as PNG.
///
/// The output is always exactly `crop.width()` x `crop.height()`; any part
/// of the box that falls outside the page is black.
///
/// # Errors
///
/// Returns `SheetError::Render` for an empty box or if PNG encoding fails.
pub fn crop_png(page: &DynamicImage, crop: CropBox) -> Result<Vec<u8>, SheetError> {
    if crop.width() == 0 || crop.height() == 0 {
        return Err(SheetError::render(format!(
            "empty crop box ({}, {}, {}, {})",
            crop.left, crop.top, crop.right, crop.bottom
        )));
    }

    let mut canvas = RgbImage::new(crop.width(), crop.height());
    imageops::overlay(
        &mut canvas,
        &page.to_rgb8(),
        -i64::from(crop.left),
        -i64::from(crop.top),
    );

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(canvas).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}
