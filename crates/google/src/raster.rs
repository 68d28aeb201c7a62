//! PDF rasterization through poppler's `pdftoppm`.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use ledgerbot_core::sheet::SheetError;
use tokio::process::Command;
use tracing::debug;

/// Renders the first page of a PDF to an image.
#[derive(Debug, Clone)]
pub struct PdfRasterizer {
    program: String,
    dpi: u32,
}

impl PdfRasterizer {
    /// Creates a rasterizer running `program` at `dpi`.
    #[must_use]
    pub fn new(program: impl Into<String>, dpi: u32) -> Self {
        Self {
            program: program.into(),
            dpi,
        }
    }

    /// Rasterizes page one of `pdf`.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::NoPages` for a document without pages, or
    /// `SheetError::Render` if the tool fails or its output is not a PNG.
    pub async fn first_page(&self, pdf: &[u8]) -> Result<DynamicImage, SheetError> {
        let mut file = tempfile::Builder::new()
            .prefix("ledger-")
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| SheetError::render(e.to_string()))?;
        file.write_all(pdf)
            .and_then(|()| file.flush())
            .map_err(|e| SheetError::render(e.to_string()))?;

        let output = Command::new(&self.program)
            .args(self.args(file.path()))
            .output()
            .await
            .map_err(|e| SheetError::render(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }
        if output.stdout.is_empty() {
            return Err(SheetError::NoPages);
        }

        debug!(bytes = output.stdout.len(), dpi = self.dpi, "Rasterized first page");
        Ok(image::load_from_memory_with_format(
            &output.stdout,
            ImageFormat::Png,
        )?)
    }

    /// Arguments for a single-page PNG written to stdout.
    fn args(&self, pdf: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-png",
            "-singlefile",
            "-f",
            "1",
            "-l",
            "1",
            "-r",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(self.dpi.to_string().into());
        args.push(pdf.as_os_str().to_owned());
        args
    }
}

/// Maps `pdftoppm` stderr to an error.
fn classify_failure(stderr: &str) -> SheetError {
    if stderr.contains("Wrong page range") {
        SheetError::NoPages
    } else {
        SheetError::render(stderr.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let rasterizer = PdfRasterizer::new("pdftoppm", 300);

        let args = rasterizer.args(Path::new("/tmp/ledger.pdf"));

        assert_eq!(
            args,
            ["-png", "-singlefile", "-f", "1", "-l", "1", "-r", "300", "/tmp/ledger.pdf"]
                .map(OsString::from)
                .to_vec()
        );
    }

    #[test]
    fn test_page_range_error_means_no_pages() {
        let err = classify_failure(
            "Wrong page range given: the first page (1) can not be after the last page (0).\n",
        );
        assert!(matches!(err, SheetError::NoPages));
    }

    #[test]
    fn test_other_failures_are_render_errors() {
        let err = classify_failure("Syntax Error: Couldn't find trailer dictionary\n");
        assert_eq!(
            err.to_string(),
            "failed to render snapshot: Syntax Error: Couldn't find trailer dictionary"
        );
    }

    #[tokio::test]
    async fn test_missing_program() {
        let rasterizer = PdfRasterizer::new("ledgerbot-no-such-pdftoppm", 300);

        let err = rasterizer.first_page(b"%PDF-1.4").await.unwrap_err();

        assert!(matches!(err, SheetError::Render(_)));
        assert!(err.to_string().contains("ledgerbot-no-such-pdftoppm"));
    }
}
