//! Batch command - compare many test documents against one reference.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use pdrift_core::{DocumentScanner, StructureDiff, compare};

use super::{load_config, load_or_extract};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Reference document (PDF or snapshot JSON)
    #[arg(required = true)]
    reference: PathBuf,

    /// Test files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file comparison results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of comparing a single test file.
struct BatchResult {
    path: PathBuf,
    diff: Option<StructureDiff>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let scanner = DocumentScanner::with_config(config);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("no matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to compare",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let reference = load_or_extract(&args.reference, &scanner)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let outcome = scanner
            .scan_file(&path)
            .map(|snapshot| compare(&reference, &snapshot));
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(diff) => {
                results.push(BatchResult {
                    path,
                    diff: Some(diff),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let message = e.to_string();
                if args.continue_on_error {
                    warn!("failed to process {}: {}", path.display(), message);
                    results.push(BatchResult {
                        path,
                        diff: None,
                        error: Some(message),
                        processing_time_ms,
                    });
                } else {
                    error!("failed to process {}: {}", path.display(), message);
                    anyhow::bail!("processing failed: {}", message);
                }
            }
        }

        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            if let Some(diff) = &result.diff {
                let stem = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");

                let output_path = output_dir.join(format!("{}.diff.json", stem));
                fs::write(&output_path, serde_json::to_string_pretty(diff)?)?;
                debug!("wrote comparison to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let passed = results
        .iter()
        .filter(|r| r.diff.as_ref().is_some_and(StructureDiff::is_pass))
        .count();
    let drifted = results
        .iter()
        .filter(|r| r.diff.as_ref().is_some_and(|d| !d.is_pass()))
        .count();
    let failed = results.iter().filter(|r| r.error.is_some()).count();

    println!();
    println!(
        "{} Compared {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} passed, {} drifted, {} failed",
        style(passed).green(),
        style(drifted).yellow(),
        style(failed).red()
    );

    if drifted > 0 || failed > 0 {
        println!();
        for result in &results {
            if let Some(diff) = &result.diff {
                if !diff.is_pass() {
                    println!(
                        "  {} {}: {} text pages / {} barcodes missing",
                        style("✗").red(),
                        result.path.display(),
                        diff.missing_text_pages.len(),
                        diff.missing_barcodes.len()
                    );
                }
            } else if let Some(error) = &result.error {
                println!("  {} {}: {}", style("✗").red(), result.path.display(), error);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "missing_text_pages",
        "additional_text_pages",
        "missing_barcodes",
        "additional_barcodes",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(diff) = &result.diff {
            wtr.write_record([
                filename,
                &diff.status.to_string(),
                &diff.missing_text_pages.len().to_string(),
                &diff.additional_text_pages.len().to_string(),
                &diff.missing_barcodes.len().to_string(),
                &diff.additional_barcodes.len().to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
