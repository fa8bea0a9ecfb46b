//! Batch processing of invoice PDFs packed in a ZIP archive.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::error::ArchiveError;
use crate::extract::RecordAggregator;
use crate::models::config::CinvConfig;
use crate::models::record::InvoiceRecord;
use crate::pdf::{PageTextSource, PdfExtractor};

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// A ZIP archive of invoice documents.
pub struct InvoiceArchive<R: Read + Seek> {
    archive: ZipArchive<R>,
    extension: String,
}

impl InvoiceArchive<File> {
    /// Open an archive file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ArchiveError::Open {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::new(file)
    }
}

impl<R: Read + Seek> InvoiceArchive<R> {
    /// Read an archive from any seekable reader, e.g. an in-memory
    /// `Cursor<Vec<u8>>`.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self {
            archive,
            extension: "pdf".to_string(),
        })
    }

    /// Only process entries with this extension (case-insensitive).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_ascii_lowercase();
        self
    }

    /// Document entries as `(index, name)`, in archive order.
    pub fn documents(&mut self) -> Result<Vec<(usize, String)>> {
        let suffix = format!(".{}", self.extension);
        let mut documents = Vec::new();
        for i in 0..self.archive.len() {
            let entry = self.archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            if entry.name().to_ascii_lowercase().ends_with(&suffix) {
                documents.push((i, entry.name().to_string()));
            }
        }
        Ok(documents)
    }

    /// Fully buffer one entry.
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        let mut entry = self.archive.by_index(index)?;
        let mut data = Vec::new();
        entry.read_to_end(&mut data).map_err(|e| ArchiveError::Entry {
            name: entry.name().to_string(),
            source: e,
        })?;
        Ok(data)
    }
}

/// Turns archives of invoice PDFs into records, one per document.
pub struct BatchProcessor<T: PageTextSource> {
    aggregator: RecordAggregator,
    text_source: T,
}

impl<T: PageTextSource> BatchProcessor<T> {
    pub fn new(aggregator: RecordAggregator, text_source: T) -> Self {
        Self {
            aggregator,
            text_source,
        }
    }

    pub fn aggregator(&self) -> &RecordAggregator {
        &self.aggregator
    }

    /// Process one buffered document.
    ///
    /// Extraction failures are logged and produce a record with only the
    /// filename set; they never fail the caller.
    pub fn process_document(&self, filename: &str, data: &[u8]) -> InvoiceRecord {
        match self.text_source.page_texts(data) {
            Ok(pages) => self.aggregator.aggregate(filename, &pages),
            Err(e) => {
                warn!("Error processing {}: {}", filename, e);
                self.aggregator.empty_record(filename)
            }
        }
    }

    /// Process every document entry of an archive, in archive order.
    ///
    /// `progress` is called after each document with `(processed, total)`.
    /// Archive-level errors abort the batch; per-document errors do not.
    pub fn process_archive<R: Read + Seek>(
        &self,
        archive: &mut InvoiceArchive<R>,
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<Vec<InvoiceRecord>> {
        let documents = archive.documents()?;
        let total = documents.len();
        info!("Processing {} documents", total);

        let mut records = Vec::with_capacity(total);
        for (processed, (index, name)) in documents.iter().enumerate() {
            debug!("Processing {}", name);

            let data = archive.read_entry(*index)?;
            records.push(self.process_document(name, &data));

            if let Some(callback) = progress.as_deref_mut() {
                callback(processed + 1, total);
            }
        }

        Ok(records)
    }
}

/// Process an archive file with the PDF extractor and a configuration.
pub fn process_archive_file(
    path: &Path,
    config: &CinvConfig,
    progress: Option<&mut dyn FnMut(usize, usize)>,
) -> crate::Result<Vec<InvoiceRecord>> {
    let aggregator = RecordAggregator::new(config.registry()?).with_body_config(&config.body)?;
    let processor = BatchProcessor::new(aggregator, PdfExtractor::new());

    let mut archive = InvoiceArchive::open(path)?.with_extension(config.archive.extension.clone());
    Ok(processor.process_archive(&mut archive, progress)?)
}
