//! Error types for the cinv-core library.

use thiserror::Error;

/// Main error type for the cinv library.
#[derive(Error, Debug)]
pub enum CinvError {
    /// Field registry or configuration file problem.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lookup of a key that is not registered.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Archive (container) error.
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Export error.
    #[error("export error: {0}")]
    Export(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while setting up field lookups. Fatal at setup time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Key contains uppercase letters or whitespace.
    #[error("invalid key '{0}': keys must be lowercase without spaces")]
    InvalidKey(String),

    /// Key is already registered.
    #[error("key '{0}' already exists")]
    DuplicateKey(String),

    /// Key collides with a column every record carries.
    #[error("key '{0}' is reserved")]
    ReservedKey(String),

    /// Configuration file could not be parsed.
    #[error("invalid configuration file: {0}")]
    Invalid(String),
}

/// Request for a key that was never registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no item with key '{key}' found")]
pub struct LookupError {
    pub key: String,
}

impl LookupError {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Errors related to opening or reading a single PDF.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to the input container. These abort a batch.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive is malformed or unreadable.
    #[error("malformed archive: {0}")]
    Malformed(#[from] zip::result::ZipError),

    /// An entry could not be read out of the archive.
    #[error("failed to read entry '{name}': {source}")]
    Entry {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The archive file could not be opened.
    #[error("failed to open archive {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the cinv library.
pub type Result<T> = std::result::Result<T, CinvError>;
