//! Core library for PDF structural drift detection.
//!
//! This crate provides:
//! - PDF processing (per-page text and page-image extraction)
//! - Barcode decoding over extracted page images
//! - Document snapshots, the serialized form of an extraction run
//! - Structural comparison between a reference and a test snapshot

pub mod barcode;
pub mod compare;
pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;

pub use barcode::{BarcodeScanner, DecodedSymbol};
pub use compare::{StructureDiff, Verdict, compare};
pub use error::{PdriftError, Result};
pub use extract::DocumentScanner;
pub use models::config::PdriftConfig;
pub use models::snapshot::{DocumentSnapshot, PageBarcode, PageText};
pub use pdf::{PdfExtractor, PdfProcessor};
