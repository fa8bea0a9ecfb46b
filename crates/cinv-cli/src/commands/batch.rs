//! Batch command - extract records from a ZIP archive of invoice PDFs.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cinv_core::archive::process_archive_file;
use cinv_core::export::write_views;
use cinv_core::models::record::InvoiceRecord;

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input ZIP archive
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write all records as records.json
    #[arg(long)]
    json: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing archive: {}", args.input.display());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut on_progress = |processed: usize, total: usize| {
        pb.set_length(total as u64);
        pb.set_position(processed as u64);
    };
    let records = process_archive_file(&args.input, &config, Some(&mut on_progress))?;

    pb.finish_and_clear();

    if records.is_empty() {
        println!(
            "{} No .{} files found in {}",
            style("ℹ").blue(),
            config.archive.extension,
            args.input.display()
        );
    }

    let (upload_path, data_path) = write_views(&records, &args.output_dir, &config.export)?;
    println!(
        "{} Upload sheet written to {}",
        style("✓").green(),
        upload_path.display()
    );
    println!(
        "{} Data sheet written to {}",
        style("✓").green(),
        data_path.display()
    );

    if args.json {
        let json_path = args.output_dir.join("records.json");
        fs::write(&json_path, serde_json::to_string_pretty(&records)?)?;
        println!(
            "{} Records written to {}",
            style("✓").green(),
            json_path.display()
        );
    }

    print_summary(&records, start);

    Ok(())
}

fn print_summary(records: &[InvoiceRecord], start: Instant) {
    let missing: Vec<&InvoiceRecord> = records.iter().filter(|r| !r.has_body()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!(
        "   {} with line items, {} without",
        style(records.len() - missing.len()).green(),
        style(missing.len()).red()
    );

    if !missing.is_empty() {
        println!();
        println!("{}", style("Files without a line-item table:").red());
        for record in &missing {
            println!("  - {}", record.filename);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());
}
