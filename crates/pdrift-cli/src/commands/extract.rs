//! Extract command - produce a structural snapshot of one PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use pdrift_core::{DocumentScanner, DocumentSnapshot};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Snapshot JSON
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Extracting {}", args.input.display()));

    let scanner = DocumentScanner::with_config(config);
    let snapshot = scanner.scan_file(&args.input)?;

    pb.finish_and_clear();

    let rendered = match args.format {
        OutputFormat::Json => snapshot.to_json_pretty()?,
        OutputFormat::Text => summarize(&snapshot),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Snapshot written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    debug!("total extraction time: {:?}", start.elapsed());

    Ok(())
}

fn summarize(snapshot: &DocumentSnapshot) -> String {
    let mut output = String::new();

    output.push_str(&format!("Text pages: {}\n", snapshot.text.len()));
    for entry in &snapshot.text {
        output.push_str(&format!("  page {}: {} chars\n", entry.page, entry.text.len()));
    }

    output.push_str(&format!("Barcodes: {}\n", snapshot.barcodes.len()));
    for entry in &snapshot.barcodes {
        output.push_str(&format!(
            "  page {}: {} ({})\n",
            entry.page, entry.data, entry.symbology
        ));
    }

    output
}
