//! Structural comparison between two document snapshots.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::snapshot::DocumentSnapshot;

/// Overall comparison verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// The test document carries everything the reference does.
    Pass,
    /// Text pages or barcodes present in the reference are missing.
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Differences between a reference snapshot and a test snapshot.
///
/// The comparison is asymmetric: content missing from the test document
/// fails it, content the test document adds does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDiff {
    /// Text-bearing pages present in the reference but not the test.
    pub missing_text_pages: BTreeSet<u32>,

    /// `(page, payload)` barcodes present in the reference but not the test.
    pub missing_barcodes: BTreeSet<(u32, String)>,

    /// Text-bearing pages only the test document has.
    pub additional_text_pages: BTreeSet<u32>,

    /// `(page, payload)` barcodes only the test document has.
    pub additional_barcodes: BTreeSet<(u32, String)>,

    /// PASS unless anything is missing.
    pub status: Verdict,
}

impl StructureDiff {
    /// True when nothing the reference has is missing from the test.
    pub fn is_pass(&self) -> bool {
        self.status == Verdict::Pass
    }
}

/// Compare the structure of a test snapshot against a reference snapshot.
///
/// Pure function of its two arguments; barcode identity is `(page, payload)`
/// and ignores the symbology.
pub fn compare(reference: &DocumentSnapshot, test: &DocumentSnapshot) -> StructureDiff {
    let ref_pages = reference.text_pages();
    let test_pages = test.text_pages();
    let ref_barcodes = reference.barcode_keys();
    let test_barcodes = test.barcode_keys();

    let missing_text_pages = &ref_pages - &test_pages;
    let additional_text_pages = &test_pages - &ref_pages;
    let missing_barcodes = &ref_barcodes - &test_barcodes;
    let additional_barcodes = &test_barcodes - &ref_barcodes;

    let status = if missing_text_pages.is_empty() && missing_barcodes.is_empty() {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    debug!(
        "comparison: {} text pages missing, {} barcodes missing -> {}",
        missing_text_pages.len(),
        missing_barcodes.len(),
        status
    );

    StructureDiff {
        missing_text_pages,
        missing_barcodes,
        additional_text_pages,
        additional_barcodes,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snapshot::{PageBarcode, PageText};
    use pretty_assertions::assert_eq;

    fn page(page: u32, text: &str) -> PageText {
        PageText {
            page,
            text: text.to_string(),
        }
    }

    fn barcode(page: u32, data: &str, symbology: &str) -> PageBarcode {
        PageBarcode {
            page,
            data: data.to_string(),
            symbology: symbology.to_string(),
        }
    }

    fn snapshot(text: Vec<PageText>, barcodes: Vec<PageBarcode>) -> DocumentSnapshot {
        DocumentSnapshot { text, barcodes }
    }

    #[test]
    fn test_self_comparison_passes() {
        let doc = snapshot(
            vec![page(1, "alpha"), page(3, "gamma")],
            vec![barcode(2, "12345", "CODE_128")],
        );

        let diff = compare(&doc, &doc);
        assert!(diff.is_pass());
        assert!(diff.missing_text_pages.is_empty());
        assert!(diff.additional_text_pages.is_empty());
        assert!(diff.missing_barcodes.is_empty());
        assert!(diff.additional_barcodes.is_empty());
    }

    #[test]
    fn test_missing_text_page_fails() {
        let reference = snapshot(vec![page(1, "a"), page(3, "c")], vec![]);
        let test = snapshot(vec![page(1, "a")], vec![]);

        let diff = compare(&reference, &test);
        assert_eq!(diff.status, Verdict::Fail);
        assert_eq!(diff.missing_text_pages, BTreeSet::from([3]));
    }

    #[test]
    fn test_additional_barcode_does_not_fail() {
        let reference = snapshot(vec![page(1, "a")], vec![]);
        let test = snapshot(vec![page(1, "a")], vec![barcode(5, "XYZ", "QR_CODE")]);

        let diff = compare(&reference, &test);
        assert_eq!(diff.status, Verdict::Pass);
        assert_eq!(
            diff.additional_barcodes,
            BTreeSet::from([(5, "XYZ".to_string())])
        );
    }

    #[test]
    fn test_text_replaced_by_barcode_fails() {
        let reference = snapshot(vec![page(1, "A")], vec![]);
        let test = snapshot(vec![], vec![barcode(1, "X", "CODE_128")]);

        let diff = compare(&reference, &test);
        assert_eq!(diff.status, Verdict::Fail);
        assert_eq!(diff.missing_text_pages, BTreeSet::from([1]));
        assert_eq!(
            diff.additional_barcodes,
            BTreeSet::from([(1, "X".to_string())])
        );
        assert!(diff.missing_barcodes.is_empty());
        assert!(diff.additional_text_pages.is_empty());
    }

    #[test]
    fn test_symbology_is_not_part_of_barcode_identity() {
        let reference = snapshot(vec![], vec![barcode(1, "123", "CODE_128")]);
        let test = snapshot(vec![], vec![barcode(1, "123", "QR_CODE")]);

        let diff = compare(&reference, &test);
        assert_eq!(diff.status, Verdict::Pass);
        assert!(diff.missing_barcodes.is_empty());
        assert!(diff.additional_barcodes.is_empty());
    }

    #[test]
    fn test_empty_reference_always_passes() {
        let reference = DocumentSnapshot::default();
        let test = snapshot(vec![page(1, "x")], vec![]);

        let diff = compare(&reference, &test);
        assert!(diff.is_pass());
        assert_eq!(diff.additional_text_pages, BTreeSet::from([1]));
    }

    #[test]
    fn test_verdict_serializes_uppercase() {
        let diff = compare(&DocumentSnapshot::default(), &DocumentSnapshot::default());
        let json = serde_json::to_string(&diff).unwrap();
        assert!(json.contains("\"status\":\"PASS\""));
    }
}
