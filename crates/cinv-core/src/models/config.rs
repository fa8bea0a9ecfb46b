//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::fields::{FieldItem, FieldRegistry, ValueKind};
use crate::error::ConfigError;

/// Main configuration for the cinv pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CinvConfig {
    /// Scalar label lookups.
    pub scan: ScanConfig,

    /// Archive traversal configuration.
    pub archive: ArchiveConfig,

    /// Line-item table anchors.
    pub body: BodyConfig,

    /// Tabular export configuration.
    pub export: ExportConfig,
}

/// Labels to look for outside the line-item table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Ordered list of lookups; keys must be unique.
    pub fields: Vec<FieldConfig>,
}

/// One scalar lookup as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub kind: ValueKind,
}

impl FieldConfig {
    fn text(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: ValueKind::Text,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fields: vec![
                FieldConfig::text("gross-weight", "Gross Weight"),
                FieldConfig::text("comm-inv-no", "Comm Inv No"),
            ],
        }
    }
}

/// Archive traversal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Entry extension to process, compared case-insensitively.
    pub extension: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            extension: "pdf".to_string(),
        }
    }
}

/// Anchors delimiting the line-item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Literal that starts the table span.
    pub start_anchor: String,

    /// Literal that ends the table span (excluded).
    pub end_anchor: String,

    /// Last header line; values start right after it.
    pub header_terminator: String,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            start_anchor: "Line".to_string(),
            end_anchor: "License:".to_string(),
            header_terminator: "Line Total".to_string(),
        }
    }
}

/// Export file names and derived-column settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File for the renamed upload subset.
    pub upload_file: String,

    /// File for the full record set.
    pub data_file: String,

    /// Scalar key the order number column is derived from.
    pub order_number_key: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            upload_file: "bom_cals.csv".to_string(),
            data_file: "pdf_data.csv".to_string(),
            order_number_key: "comm-inv-no".to_string(),
        }
    }
}

impl CinvConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Build the validated field registry for the configured lookups.
    pub fn registry(&self) -> Result<FieldRegistry, ConfigError> {
        let items = self
            .scan
            .fields
            .iter()
            .map(|f| FieldItem::new(f.key.clone(), f.label.clone(), f.kind))
            .collect::<Result<Vec<_>, _>>()?;
        FieldRegistry::from_items(items)
    }
}
