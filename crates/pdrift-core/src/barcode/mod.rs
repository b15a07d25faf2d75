//! Barcode detection over raster images.

mod scanner;

pub use scanner::{BarcodeScanner, DecodedSymbol};

use crate::error::BarcodeError;

/// Result type for barcode operations.
pub type Result<T> = std::result::Result<T, BarcodeError>;
