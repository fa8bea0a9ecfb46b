//! Per-document output records.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::fields::ScalarValues;
use super::schema::BodyField;

/// Values segmented out of the line-item table, one slot per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedBody {
    values: [Option<String>; 9],
    /// Tokens left unassigned after the last column.
    pub surplus: usize,
}

impl SegmentedBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: BodyField) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    pub fn set(&mut self, field: BodyField, value: Option<String>) {
        self.values[field.index()] = value;
    }

    /// Columns and their values in table order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyField, Option<&str>)> {
        BodyField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

/// One flat record per document: filename, scalar lookups, and the
/// line-item columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub filename: String,
    pub scalars: ScalarValues,
    /// `None` when no line-item table could be segmented.
    pub body: Option<SegmentedBody>,
}

impl InvoiceRecord {
    pub fn new(filename: impl Into<String>, scalars: ScalarValues, body: Option<SegmentedBody>) -> Self {
        Self {
            filename: filename.into(),
            scalars,
            body,
        }
    }

    /// Value of a line-item column; `None` for an unparseable body.
    pub fn body_value(&self, field: BodyField) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.get(field))
    }

    /// Value of a scalar lookup.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.scalars.get(key)
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl Serialize for InvoiceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.scalars.len() + BodyField::ALL.len()))?;
        map.serialize_entry("filename", &self.filename)?;
        for (key, value) in self.scalars.iter() {
            map.serialize_entry(key, &value)?;
        }
        for field in BodyField::ALL {
            map.serialize_entry(field.name(), &self.body_value(field))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::{FieldItem, FieldRegistry};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_serializes_flat() {
        let registry =
            FieldRegistry::from_items([FieldItem::text("comm-inv-no", "Comm Inv No").unwrap()])
                .unwrap();
        let mut scalars = registry.empty_values();
        scalars.set("comm-inv-no", "CI-1001-7").unwrap();

        let mut body = SegmentedBody::new();
        body.set(BodyField::Line, Some("1".to_string()));
        body.set(BodyField::LineTotal, Some("1,000.00".to_string()));

        let record = InvoiceRecord::new("a.pdf", scalars, Some(body));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["filename"], "a.pdf");
        assert_eq!(json["comm-inv-no"], "CI-1001-7");
        assert_eq!(json["Line"], "1");
        assert_eq!(json["Line Total"], "1,000.00");
        assert!(json["Description"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_record_without_body_has_null_columns() {
        let record = InvoiceRecord::new("b.pdf", FieldRegistry::new().empty_values(), None);
        let json = serde_json::to_value(&record).unwrap();

        for field in BodyField::ALL {
            assert!(json[field.name()].is_null());
        }
        assert!(!record.has_body());
    }
}
