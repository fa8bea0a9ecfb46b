//! Per-document record assembly.

use tracing::debug;

use super::locator::BodyLocator;
use super::scanner::scan_key_values;
use super::segmenter::FieldSegmenter;
use crate::error::ConfigError;
use crate::models::config::BodyConfig;
use crate::models::fields::FieldRegistry;
use crate::models::record::{InvoiceRecord, SegmentedBody};

/// Builds one [`InvoiceRecord`] per document from its page texts.
///
/// Holds only immutable lookup and layout definitions; every call starts
/// from fresh scalar values, so one aggregator can serve a whole batch.
#[derive(Debug, Clone)]
pub struct RecordAggregator {
    registry: FieldRegistry,
    locator: BodyLocator,
    segmenter: FieldSegmenter,
}

impl RecordAggregator {
    /// Create an aggregator with the standard table anchors.
    pub fn new(registry: FieldRegistry) -> Self {
        Self {
            registry,
            locator: BodyLocator::new(),
            segmenter: FieldSegmenter::new(),
        }
    }

    /// Use the anchors from a body configuration.
    pub fn with_body_config(mut self, config: &BodyConfig) -> Result<Self, ConfigError> {
        self.locator = BodyLocator::from_config(config)?;
        self.segmenter = FieldSegmenter::new().with_header_terminator(config.header_terminator.clone());
        Ok(self)
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Locate and segment the line-item table.
    pub fn extract_body<S: AsRef<str>>(&self, pages: &[S]) -> Option<SegmentedBody> {
        let span = self.locator.locate(pages)?;
        self.segmenter.segment(span)
    }

    /// Combine filename, scalar lookups, and table columns into a record.
    pub fn aggregate<S: AsRef<str>>(&self, filename: &str, pages: &[S]) -> InvoiceRecord {
        let scalars = scan_key_values(pages, &self.registry);
        let body = self.extract_body(pages);

        if body.is_none() {
            debug!("{}: no line-item table found", filename);
        }

        InvoiceRecord::new(filename, scalars, body)
    }

    /// Record for a document whose text could not be read.
    pub fn empty_record(&self, filename: &str) -> InvoiceRecord {
        InvoiceRecord::new(filename, self.registry.empty_values(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldItem;
    use crate::models::schema::BodyField;
    use pretty_assertions::assert_eq;

    fn aggregator() -> RecordAggregator {
        RecordAggregator::new(
            FieldRegistry::from_items([
                FieldItem::text("gross-weight", "Gross Weight").unwrap(),
                FieldItem::text("comm-inv-no", "Comm Inv No").unwrap(),
            ])
            .unwrap(),
        )
    }

    const PAGE: &str = "Commercial Invoice\nComm Inv No\nCI-4410-12\nGross Weight\n8 KG\n\
Line\nMarketing Part Number\nDescription\nLine Total\n\
1\nMKT-001\nWidget Assembly\n1234567-890123\nCN China\n10\n10\n100.00\n1,000.00\n\
License: NLR\n";

    #[test]
    fn test_aggregate_full_document() {
        let record = aggregator().aggregate("invoices/a.pdf", &[PAGE]);

        assert_eq!(record.filename, "invoices/a.pdf");
        assert_eq!(record.scalar("comm-inv-no"), Some("CI-4410-12"));
        assert_eq!(record.scalar("gross-weight"), Some("8 KG"));
        assert_eq!(record.body_value(BodyField::Description), Some("Widget Assembly"));
        assert_eq!(record.body_value(BodyField::LineTotal), Some("1,000.00"));
    }

    #[test]
    fn test_unparseable_body_keeps_scalars() {
        let page = "Comm Inv No\nCI-1\nLine\nMarketing\n1\nLicense: NLR";
        let record = aggregator().aggregate("b.pdf", &[page]);

        assert_eq!(record.filename, "b.pdf");
        assert_eq!(record.scalar("comm-inv-no"), Some("CI-1"));
        assert!(record.body.is_none());
        for field in BodyField::ALL {
            assert_eq!(record.body_value(field), None);
        }
    }

    #[test]
    fn test_records_do_not_share_values() {
        let aggregator = aggregator();
        let first = aggregator.aggregate("a.pdf", &[PAGE]);
        let second = aggregator.aggregate("b.pdf", &["blank"]);

        assert_eq!(first.scalar("gross-weight"), Some("8 KG"));
        assert_eq!(second.scalar("gross-weight"), None);
        assert_eq!(second.scalar("comm-inv-no"), None);
    }

    #[test]
    fn test_custom_body_config() {
        let config = BodyConfig {
            start_anchor: "Item".to_string(),
            end_anchor: "End of items".to_string(),
            header_terminator: "Amount".to_string(),
        };
        let aggregator = aggregator().with_body_config(&config).unwrap();
        let record = aggregator.aggregate("c.pdf", &["Item\nAmount\n4\nMKT-4\nEnd of items"]);

        assert_eq!(record.body_value(BodyField::Line), Some("4"));
        assert_eq!(record.body_value(BodyField::MarketingPartNumber), Some("MKT-4"));
    }

    #[test]
    fn test_empty_record() {
        let record = aggregator().empty_record("broken.pdf");

        assert_eq!(record.filename, "broken.pdf");
        assert!(record.scalars.iter().all(|(_, v)| v.is_none()));
        assert!(!record.has_body());
    }
}
