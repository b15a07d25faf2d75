//! CLI subcommands.

pub mod batch;
pub mod compare;
pub mod config;
pub mod extract;

use std::path::Path;

use pdrift_core::{DocumentScanner, DocumentSnapshot, PdriftConfig};

/// Load the pipeline configuration from an explicit path or defaults.
fn load_config(config_path: Option<&str>) -> anyhow::Result<PdriftConfig> {
    match config_path {
        Some(path) => Ok(PdriftConfig::from_file(Path::new(path))?),
        None => Ok(PdriftConfig::default()),
    }
}

/// Obtain a snapshot from a path: `.json` files are loaded as saved
/// snapshots, anything else is extracted as a PDF.
fn load_or_extract(path: &Path, scanner: &DocumentScanner) -> anyhow::Result<DocumentSnapshot> {
    if !path.exists() {
        anyhow::bail!("input file not found: {}", path.display());
    }

    let is_snapshot = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_snapshot {
        Ok(DocumentSnapshot::load(path)?)
    } else {
        Ok(scanner.scan_file(path)?)
    }
}
