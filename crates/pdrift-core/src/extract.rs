//! Document extraction - runs both extraction passes over one PDF.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::barcode::BarcodeScanner;
use crate::error::Result;
use crate::models::config::PdriftConfig;
use crate::models::snapshot::{DocumentSnapshot, PageBarcode, PageText};
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Runs the text and barcode extraction passes over a document and collects
/// the results into a [`DocumentSnapshot`].
///
/// File-level failures (unreadable file, malformed PDF) are errors; per-page
/// failures are logged and skipped so a partially damaged document still
/// yields a partial snapshot.
pub struct DocumentScanner {
    config: PdriftConfig,
}

impl DocumentScanner {
    /// Create a scanner with default configuration.
    pub fn new() -> Self {
        Self {
            config: PdriftConfig::default(),
        }
    }

    /// Create a scanner with the given configuration.
    pub fn with_config(config: PdriftConfig) -> Self {
        Self { config }
    }

    /// Extract a structural snapshot from a PDF file.
    pub fn scan_file(&self, path: &Path) -> Result<DocumentSnapshot> {
        info!("extracting structure from {}", path.display());
        let data = fs::read(path)?;
        self.scan_bytes(&data)
    }

    /// Extract a structural snapshot from in-memory PDF bytes.
    pub fn scan_bytes(&self, data: &[u8]) -> Result<DocumentSnapshot> {
        let mut extractor = PdfExtractor::new()
            .with_empty_password_decryption(self.config.pdf.decrypt_empty_password);
        extractor.load(data)?;

        let page_count = self.effective_page_count(extractor.page_count());
        let text = self.collect_text(&extractor, page_count);
        let barcodes = self.collect_barcodes(&extractor, page_count);

        info!(
            "extracted {} text pages and {} barcodes from {} pages",
            text.len(),
            barcodes.len(),
            page_count
        );
        Ok(DocumentSnapshot { text, barcodes })
    }

    fn effective_page_count(&self, total: u32) -> u32 {
        match self.config.pdf.max_pages {
            0 => total,
            cap => total.min(cap as u32),
        }
    }

    fn collect_text(&self, extractor: &PdfExtractor, page_count: u32) -> Vec<PageText> {
        let mut records = Vec::new();

        for page in 1..=page_count {
            match extractor.extract_page_text(page) {
                Ok(raw) => {
                    let text = raw.trim();
                    if text.is_empty() {
                        warn!("no text on page {}", page);
                    } else {
                        debug!("extracted {} chars of text from page {}", text.len(), page);
                        records.push(PageText {
                            page,
                            text: text.to_string(),
                        });
                    }
                }
                Err(e) => warn!("text extraction failed on page {}: {}", page, e),
            }
        }

        if records.is_empty() {
            records = self.fallback_text(extractor, page_count);
        }
        records
    }

    /// Whole-document text pass for files that defeat per-page extraction.
    ///
    /// pdf-extract separates pages with form feeds, which keeps the
    /// 1-indexed page attribution intact.
    fn fallback_text(&self, extractor: &PdfExtractor, page_count: u32) -> Vec<PageText> {
        let full = match extractor.extract_text() {
            Ok(full) => full,
            Err(e) => {
                warn!("whole-document text extraction failed: {}", e);
                return Vec::new();
            }
        };

        full.split('\u{0C}')
            .enumerate()
            .take(page_count as usize)
            .filter_map(|(idx, chunk)| {
                let text = chunk.trim();
                (!text.is_empty()).then(|| PageText {
                    page: idx as u32 + 1,
                    text: text.to_string(),
                })
            })
            .collect()
    }

    fn collect_barcodes(&self, extractor: &PdfExtractor, page_count: u32) -> Vec<PageBarcode> {
        let scanner = BarcodeScanner::from_config(&self.config.barcode);
        let mut records = Vec::new();

        for page in 1..=page_count {
            let images = match extractor.page_images(page) {
                Ok(images) => images,
                Err(e) => {
                    warn!("image extraction failed on page {}: {}", page, e);
                    continue;
                }
            };
            if images.is_empty() {
                debug!("no raster images on page {}", page);
                continue;
            }

            for image in &images {
                match scanner.scan(image) {
                    Ok(symbols) => {
                        for symbol in symbols {
                            info!(
                                "barcode on page {}: {} ({})",
                                page, symbol.data, symbol.symbology
                            );
                            records.push(PageBarcode {
                                page,
                                data: symbol.data,
                                symbology: symbol.symbology,
                            });
                        }
                    }
                    Err(e) => warn!("barcode decoding failed on page {}: {}", page, e),
                }
            }
        }

        records
    }
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdriftError;

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = DocumentScanner::new()
            .scan_file(Path::new("no/such/file.pdf"))
            .unwrap_err();
        assert!(matches!(err, PdriftError::Io(_)));
    }

    #[test]
    fn test_garbage_bytes_are_a_pdf_error() {
        let err = DocumentScanner::new().scan_bytes(b"not a pdf").unwrap_err();
        assert!(matches!(err, PdriftError::Pdf(_)));
    }

    #[test]
    fn test_page_cap_applies() {
        let mut config = PdriftConfig::default();
        config.pdf.max_pages = 3;
        let scanner = DocumentScanner::with_config(config);
        assert_eq!(scanner.effective_page_count(10), 3);
        assert_eq!(scanner.effective_page_count(2), 2);
    }
}
