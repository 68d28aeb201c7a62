//! Collaborator error types.

use thiserror::Error;

/// Failures raised by the spreadsheet and export collaborators.
///
/// The `Display` text is what users see in chat, so the not-found,
/// empty-data, export and no-pages messages are kept stable.
#[derive(Debug, Error)]
pub enum SheetError {
    /// No tab carries the requested title.
    #[error("Sheet titled '{title}' not found.")]
    NotFound {
        /// Requested title.
        title: String,
    },

    /// A fetched range held no rows.
    #[error("No data found in the sheet.")]
    EmptyData,

    /// The PDF export endpoint answered with a non-success status.
    #[error("Failed to export PDF: {status} {body}")]
    Export {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Rasterization produced no pages.
    #[error("No pages found in the PDF.")]
    NoPages,

    /// Access token could not be obtained.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport or API-level request failure.
    #[error("request failed: {0}")]
    Http(String),

    /// Rasterizing, cropping or encoding the snapshot failed.
    #[error("failed to render snapshot: {0}")]
    Render(String),
}

impl SheetError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into(),
        }
    }

    /// Create an export failure.
    #[must_use]
    pub fn export(status: u16, body: impl Into<String>) -> Self {
        Self::Export {
            status,
            body: body.into(),
        }
    }

    /// Create an authentication error.
    #[must_use]
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a request error.
    #[must_use]
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a render error.
    #[must_use]
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<image::ImageError> for SheetError {
    fn from(err: image::ImageError) -> Self {
        Self::Render(err.to_string())
    }
}
