//! Error types for the pdrift-core library.

use thiserror::Error;

/// Main error type for the pdrift library.
#[derive(Error, Debug)]
pub enum PdriftError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Barcode decoding error.
    #[error("barcode error: {0}")]
    Barcode(#[from] BarcodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot or configuration serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to barcode decoding.
#[derive(Error, Debug)]
pub enum BarcodeError {
    /// The decoder rejected the input or failed internally.
    #[error("barcode decoding failed: {0}")]
    Decode(String),

    /// Invalid image dimensions or format.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the pdrift library.
pub type Result<T> = std::result::Result<T, PdriftError>;
