//! Core library for commercial invoice PDF extraction.
//!
//! This crate provides:
//! - PDF page text extraction
//! - Scalar field lookups (label on one line, value on the next)
//! - Line-item table location and column segmentation
//! - ZIP archive batch processing
//! - Tabular export of the resulting records

pub mod archive;
pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod pdf;

pub use archive::{process_archive_file, BatchProcessor, InvoiceArchive};
pub use error::{ArchiveError, CinvError, ConfigError, LookupError, PdfError, Result};
pub use export::{
    coerce_amount, data_table, order_number, upload_table, write_views, Cell, ExportTable,
};
pub use extract::{scan_key_values, segment_body, RecordAggregator};
pub use models::{
    BodyField, CinvConfig, FieldItem, FieldRegistry, InvoiceRecord, ScalarValues, SegmentedBody,
    ValueKind,
};
pub use pdf::{PageTextSource, PdfExtractor};
