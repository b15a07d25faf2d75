//! Barcode scanner built on the rxing (ZXing port) decoder.

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use rxing::Exceptions;
use tracing::{debug, trace};

use super::Result;
use crate::error::BarcodeError;
use crate::models::config::BarcodeConfig;

/// A single decoded barcode symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Decoded payload.
    pub data: String,

    /// Symbology name as reported by the decoder (e.g. CODE_128, QR_CODE).
    pub symbology: String,
}

/// Scans raster images for barcode symbols of any supported symbology.
pub struct BarcodeScanner {
    /// Longest allowed image dimension before decoding (0 = no cap).
    max_image_size: u32,
    /// Accepted symbology names (empty = accept all).
    formats: Vec<String>,
}

impl BarcodeScanner {
    /// Create a new scanner with default settings.
    pub fn new() -> Self {
        Self {
            max_image_size: 2048,
            formats: Vec::new(),
        }
    }

    /// Create a scanner from pipeline configuration.
    pub fn from_config(config: &BarcodeConfig) -> Self {
        Self {
            max_image_size: config.max_image_size,
            formats: config.formats.clone(),
        }
    }

    /// Cap the longest image dimension before decoding (0 disables).
    pub fn with_max_image_size(mut self, size: u32) -> Self {
        self.max_image_size = size;
        self
    }

    /// Restrict results to the given symbology names (empty accepts all).
    pub fn with_formats(mut self, formats: Vec<String>) -> Self {
        self.formats = formats;
        self
    }

    /// Decode every barcode symbol found in the image.
    ///
    /// An image without any symbol is an empty result, not an error.
    pub fn scan(&self, image: &DynamicImage) -> Result<Vec<DecodedSymbol>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(BarcodeError::InvalidImage(format!(
                "{}x{} image",
                width, height
            )));
        }

        let gray = if self.max_image_size > 0 && width.max(height) > self.max_image_size {
            trace!("downscaling {}x{} image before decoding", width, height);
            image
                .resize(self.max_image_size, self.max_image_size, FilterType::Lanczos3)
                .to_luma8()
        } else {
            image.to_luma8()
        };

        let (width, height) = gray.dimensions();
        let detections = match rxing::helpers::detect_multiple_in_luma(gray.into_raw(), width, height)
        {
            Ok(detections) => detections,
            Err(Exceptions::NotFoundException(_)) => Vec::new(),
            Err(e) => return Err(BarcodeError::Decode(e.to_string())),
        };

        let symbols: Vec<DecodedSymbol> = detections
            .into_iter()
            .map(|detection| DecodedSymbol {
                data: detection.getText().to_string(),
                symbology: detection.getBarcodeFormat().to_string(),
            })
            .filter(|symbol| self.accepts(&symbol.symbology))
            .collect();

        debug!("decoded {} barcode symbols", symbols.len());
        Ok(symbols)
    }

    fn accepts(&self, symbology: &str) -> bool {
        self.formats.is_empty()
            || self
                .formats
                .iter()
                .any(|format| format.eq_ignore_ascii_case(symbology))
    }
}

impl Default for BarcodeScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_has_no_symbols() {
        let image = DynamicImage::new_luma8(64, 64);
        let symbols = BarcodeScanner::new().scan(&image).unwrap();
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_zero_sized_image_is_rejected() {
        let image = DynamicImage::new_luma8(0, 0);
        assert!(BarcodeScanner::new().scan(&image).is_err());
    }

    #[test]
    fn test_format_filter_is_case_insensitive() {
        let scanner = BarcodeScanner::new().with_formats(vec!["QR_CODE".to_string()]);
        assert!(scanner.accepts("qr_code"));
        assert!(!scanner.accepts("CODE_128"));
    }

    #[test]
    fn test_empty_format_filter_accepts_all() {
        let scanner = BarcodeScanner::new();
        assert!(scanner.accepts("AZTEC"));
    }
}
