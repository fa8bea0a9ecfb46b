//! Process command - extract a record from a single invoice PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use cinv_core::export::data_table;
use cinv_core::extract::RecordAggregator;
use cinv_core::models::config::CinvConfig;
use cinv_core::models::record::InvoiceRecord;
use cinv_core::pdf::{PageTextSource, PdfExtractor};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
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
    /// JSON output
    Json,
    /// CSV output (one header row, one data row)
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let record = process_pdf(&args.input, &config)?;
    let output = format_record(&record, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn process_pdf(path: &Path, config: &CinvConfig) -> anyhow::Result<InvoiceRecord> {
    let data = fs::read(path)?;
    let pages = PdfExtractor::new().page_texts(&data)?;
    debug!("Extracted {} pages", pages.len());

    let aggregator = RecordAggregator::new(config.registry()?).with_body_config(&config.body)?;

    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("invoice.pdf");

    Ok(aggregator.aggregate(filename, &pages))
}

fn format_record(
    record: &InvoiceRecord,
    format: OutputFormat,
    config: &CinvConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let table = data_table(std::slice::from_ref(record), &config.export.order_number_key);
            Ok(table.to_csv_string()?.trim_end().to_string())
        }
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn format_record_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", record.filename));
    output.push('\n');

    for (key, value) in record.scalars.iter() {
        output.push_str(&format!("{}: {}\n", key, value.unwrap_or("-")));
    }

    output.push('\n');
    match &record.body {
        Some(body) => {
            output.push_str("Line item:\n");
            for (field, value) in body.iter() {
                output.push_str(&format!("  {}: {}\n", field.name(), value.unwrap_or("-")));
            }
        }
        None => output.push_str("No line-item table found\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinv_core::models::fields::{FieldItem, FieldRegistry};

    fn record() -> InvoiceRecord {
        let registry =
            FieldRegistry::from_items([FieldItem::text("comm-inv-no", "Comm Inv No").unwrap()])
                .unwrap();
        let aggregator = RecordAggregator::new(registry);
        aggregator.aggregate(
            "a.pdf",
            &["Comm Inv No\nCI-1001-7\nLine\nLine Total\n1\nMKT-1\nLicense: NLR"],
        )
    }

    #[test]
    fn test_text_format() {
        let text = format_record_text(&record());
        assert!(text.contains("File: a.pdf"));
        assert!(text.contains("comm-inv-no: CI-1001-7"));
        assert!(text.contains("  Marketing Part Number: MKT-1"));
        assert!(text.contains("  Line Total: -"));
    }

    #[test]
    fn test_csv_format() {
        let csv = format_record(&record(), OutputFormat::Csv, &CinvConfig::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("filename,comm-inv-no,Line,"));
        assert!(lines[1].ends_with(",1001-7"));
    }
}
