//! Tabular export of invoice records.
//!
//! Two views are produced: the full record set, and a renamed subset laid
//! out for the BOM upload sheet.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::config::ExportConfig;
use crate::models::record::InvoiceRecord;
use crate::models::schema::BodyField;

/// Name of the column derived from the commercial invoice number.
pub const ORDER_NUMBER_COLUMN: &str = "oracle-so#";

/// Columns coerced to numbers in both views.
const NUMERIC_FIELDS: [BodyField; 2] = [BodyField::UnitPrice, BodyField::LineTotal];

/// Upload view: source column and its renamed header.
const UPLOAD_COLUMNS: [(&str, &str); 6] = [
    ("Comprising Manufacturing Part No", "PN"),
    ("Description", "Desc"),
    ("Shipped Qty", "QTY"),
    ("Unit Price", "Value"),
    ("Line Total", "Total"),
    (ORDER_NUMBER_COLUMN, "Oracle SO#"),
];

/// Parse a thousands-separated amount ("12,345.67").
///
/// Empty or non-numeric text gives `None`.
pub fn coerce_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Order number from a commercial invoice number: everything after the
/// first hyphen-delimited segment ("CI-1001-7" gives "1001-7").
pub fn order_number(comm_inv_no: Option<&str>) -> String {
    comm_inv_no
        .map(|s| s.trim().split('-').skip(1).collect::<Vec<_>>().join("-"))
        .unwrap_or_default()
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(Decimal),
    Empty,
}

impl Cell {
    fn text(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, |v| Cell::Text(v.to_string()))
    }

    fn number(value: Option<&str>) -> Self {
        value.and_then(coerce_amount).map_or(Cell::Empty, Cell::Number)
    }

    /// Text as written to CSV; empty cells are empty strings.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// A rectangular table with named columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ExportTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the named column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Write the table as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(Cell::render))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render the table as a CSV string.
    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Keep the listed columns, in the given order, under new names.
    /// Missing source columns become empty.
    fn select_renamed(&self, columns: &[(&str, &str)]) -> ExportTable {
        let indices: Vec<Option<usize>> =
            columns.iter().map(|(src, _)| self.column_index(src)).collect();

        ExportTable {
            columns: columns.iter().map(|(_, dst)| dst.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    indices
                        .iter()
                        .map(|idx| idx.and_then(|i| row.get(i).cloned()).unwrap_or(Cell::Empty))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Full view: filename, scalar lookups, the nine table columns, and the
/// derived order number. Unit Price and Line Total are numeric.
///
/// Scalar columns come from the first record; all records of a batch share
/// one registry.
pub fn data_table(records: &[InvoiceRecord], order_key: &str) -> ExportTable {
    let scalar_keys: Vec<String> = records
        .first()
        .map(|r| r.scalars.keys().map(str::to_string).collect())
        .unwrap_or_default();

    let mut columns = vec!["filename".to_string()];
    columns.extend(scalar_keys.iter().cloned());
    columns.extend(BodyField::ALL.iter().map(|f| f.name().to_string()));
    columns.push(ORDER_NUMBER_COLUMN.to_string());

    let rows = records
        .iter()
        .map(|record| {
            let mut row = vec![Cell::Text(record.filename.clone())];
            row.extend(scalar_keys.iter().map(|k| Cell::text(record.scalar(k))));
            row.extend(BodyField::ALL.iter().map(|field| {
                let value = record.body_value(*field);
                if NUMERIC_FIELDS.contains(field) {
                    Cell::number(value)
                } else {
                    Cell::text(value)
                }
            }));
            row.push(Cell::Text(order_number(record.scalar(order_key))));
            row
        })
        .collect();

    ExportTable { columns, rows }
}

/// Upload view: part number, description, quantity, prices, and order
/// number under the upload sheet's headers.
pub fn upload_table(records: &[InvoiceRecord], order_key: &str) -> ExportTable {
    data_table(records, order_key).select_renamed(&UPLOAD_COLUMNS)
}

/// Write both views into `dir` as CSV files. Returns the upload and data
/// file paths.
pub fn write_views(
    records: &[InvoiceRecord],
    dir: &Path,
    config: &ExportConfig,
) -> crate::Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;

    let upload_path = dir.join(&config.upload_file);
    upload_table(records, &config.order_number_key)
        .write_csv(BufWriter::new(File::create(&upload_path)?))?;

    let data_path = dir.join(&config.data_file);
    data_table(records, &config.order_number_key)
        .write_csv(BufWriter::new(File::create(&data_path)?))?;

    Ok((upload_path, data_path))
}
