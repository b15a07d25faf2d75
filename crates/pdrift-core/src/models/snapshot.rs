//! Document snapshot models - the serialized result of an extraction run.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Text extracted from a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed).
    pub page: u32,

    /// Trimmed text content (never empty).
    pub text: String,
}

/// A barcode symbol decoded from a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBarcode {
    /// Page number (1-indexed).
    pub page: u32,

    /// Decoded payload.
    pub data: String,

    /// Symbology name as reported by the decoder (e.g. CODE_128, QR_CODE).
    #[serde(rename = "type")]
    pub symbology: String,
}

/// The structural features extracted from one document.
///
/// The serialized form is the reference-data format: a JSON object with
/// `text` and `barcodes` arrays. Snapshots are immutable once extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Per-page text records in page order. Textless pages are omitted.
    #[serde(default)]
    pub text: Vec<PageText>,

    /// Decoded barcode symbols in page order.
    #[serde(default)]
    pub barcodes: Vec<PageBarcode>,
}

impl DocumentSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the snapshot as indented UTF-8 JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Indented JSON rendering of the snapshot.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pages that carry extractable text.
    pub fn text_pages(&self) -> BTreeSet<u32> {
        self.text.iter().map(|entry| entry.page).collect()
    }

    /// `(page, payload)` identity of every decoded barcode.
    ///
    /// The symbology is not part of the identity.
    pub fn barcode_keys(&self) -> BTreeSet<(u32, String)> {
        self.barcodes
            .iter()
            .map(|entry| (entry.page, entry.data.clone()))
            .collect()
    }

    /// True when neither pass extracted anything.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.barcodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DocumentSnapshot {
        DocumentSnapshot {
            text: vec![PageText {
                page: 1,
                text: "hello".to_string(),
            }],
            barcodes: vec![PageBarcode {
                page: 2,
                data: "4006381333931".to_string(),
                symbology: "EAN_13".to_string(),
            }],
        }
    }

    #[test]
    fn test_symbology_serializes_as_type() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"type\":\"EAN_13\""));
    }

    #[test]
    fn test_snapshot_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.json");

        let snapshot = sample();
        snapshot.save(&path).unwrap();

        assert_eq!(DocumentSnapshot::load(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let snapshot: DocumentSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_barcode_keys_ignore_symbology() {
        let keys = sample().barcode_keys();
        assert!(keys.contains(&(2, "4006381333931".to_string())));
    }
}
