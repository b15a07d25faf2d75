//! Compare command - diff a test document against a reference.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use pdrift_core::{DocumentScanner, StructureDiff, Verdict, compare};

use super::extract::OutputFormat;
use super::{load_config, load_or_extract};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Reference document (PDF or snapshot JSON)
    #[arg(required = true)]
    reference: PathBuf,

    /// Test document (PDF or snapshot JSON)
    #[arg(required = true)]
    test: PathBuf,

    /// Write the comparison result to a file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let scanner = DocumentScanner::with_config(config);

    let reference = load_or_extract(&args.reference, &scanner)?;
    let test = load_or_extract(&args.test, &scanner)?;

    let diff = compare(&reference, &test);

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&diff)?,
        OutputFormat::Text => summarize(&diff),
    };
    println!("{}", rendered);

    if let Some(output_path) = &args.output {
        fs::write(output_path, serde_json::to_string_pretty(&diff)?)?;
        println!(
            "{} Comparison written to {}",
            style("✓").green(),
            output_path.display()
        );
    }

    match diff.status {
        Verdict::Pass => {
            println!("{} Structure matches the reference", style("✓").green());
            Ok(())
        }
        Verdict::Fail => {
            println!("{} Structural drift detected", style("✗").red());
            std::process::exit(1);
        }
    }
}

fn summarize(diff: &StructureDiff) -> String {
    let mut output = String::new();

    output.push_str(&format!("Status: {}\n", diff.status));
    push_pages(&mut output, "Missing text pages", &diff.missing_text_pages);
    push_pages(
        &mut output,
        "Additional text pages",
        &diff.additional_text_pages,
    );
    push_barcodes(&mut output, "Missing barcodes", &diff.missing_barcodes);
    push_barcodes(&mut output, "Additional barcodes", &diff.additional_barcodes);

    output
}

fn push_pages(output: &mut String, label: &str, pages: &BTreeSet<u32>) {
    if pages.is_empty() {
        return;
    }
    let listed: Vec<String> = pages.iter().map(u32::to_string).collect();
    output.push_str(&format!("{}: {}\n", label, listed.join(", ")));
}

fn push_barcodes(output: &mut String, label: &str, barcodes: &BTreeSet<(u32, String)>) {
    if barcodes.is_empty() {
        return;
    }
    output.push_str(&format!("{}:\n", label));
    for (page, data) in barcodes {
        output.push_str(&format!("  page {}: {}\n", page, data));
    }
}
