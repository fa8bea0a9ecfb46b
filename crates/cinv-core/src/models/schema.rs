//! Fixed nine-column layout of the invoice line-item table.

use serde::{Serialize, Serializer};

use crate::extract::boundary::Boundary;

/// A column of the line-item table, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyField {
    Line,
    MarketingPartNumber,
    Description,
    ComprisingManufacturingPartNo,
    AssembledIn,
    QtyPerCountry,
    ShippedQty,
    UnitPrice,
    LineTotal,
}

impl BodyField {
    /// Every field in table order.
    pub const ALL: [BodyField; 9] = [
        BodyField::Line,
        BodyField::MarketingPartNumber,
        BodyField::Description,
        BodyField::ComprisingManufacturingPartNo,
        BodyField::AssembledIn,
        BodyField::QtyPerCountry,
        BodyField::ShippedQty,
        BodyField::UnitPrice,
        BodyField::LineTotal,
    ];

    /// Column name as printed in the table header.
    pub fn name(&self) -> &'static str {
        match self {
            BodyField::Line => "Line",
            BodyField::MarketingPartNumber => "Marketing Part Number",
            BodyField::Description => "Description",
            BodyField::ComprisingManufacturingPartNo => "Comprising Manufacturing Part No",
            BodyField::AssembledIn => "Assembled In",
            BodyField::QtyPerCountry => "Qty Per Country",
            BodyField::ShippedQty => "Shipped Qty",
            BodyField::UnitPrice => "Unit Price",
            BodyField::LineTotal => "Line Total",
        }
    }

    /// Position in the table.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a field by its column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl Serialize for BodyField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// How one column of the table is read from the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaFieldDefinition {
    pub field: BodyField,
    /// Set for columns that span a variable number of lines; decides where
    /// the column ends.
    pub boundary: Option<Boundary>,
    /// Separator used to join the lines of a multi-line column.
    pub join_separator: &'static str,
}

impl SchemaFieldDefinition {
    /// A column holding exactly one line.
    pub const fn single(field: BodyField) -> Self {
        Self {
            field,
            boundary: None,
            join_separator: " ",
        }
    }

    /// A column spanning lines until `boundary` says stop.
    pub const fn multi_line(field: BodyField, boundary: Boundary) -> Self {
        Self {
            field,
            boundary: Some(boundary),
            join_separator: " ",
        }
    }

    pub fn is_multi_line(&self) -> bool {
        self.boundary.is_some()
    }
}

/// The line-item table layout.
pub const BODY_SCHEMA: [SchemaFieldDefinition; 9] = [
    SchemaFieldDefinition::single(BodyField::Line),
    SchemaFieldDefinition::single(BodyField::MarketingPartNumber),
    SchemaFieldDefinition::multi_line(BodyField::Description, Boundary::NumberOrPartNumber),
    SchemaFieldDefinition::single(BodyField::ComprisingManufacturingPartNo),
    SchemaFieldDefinition::multi_line(BodyField::AssembledIn, Boundary::Number),
    SchemaFieldDefinition::multi_line(BodyField::QtyPerCountry, Boundary::OneQuantityPerCountry),
    SchemaFieldDefinition::single(BodyField::ShippedQty),
    SchemaFieldDefinition::single(BodyField::UnitPrice),
    SchemaFieldDefinition::single(BodyField::LineTotal),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_matches_fields() {
        for (i, def) in BODY_SCHEMA.iter().enumerate() {
            assert_eq!(def.field, BodyField::ALL[i]);
            assert_eq!(def.field.index(), i);
        }
    }

    #[test]
    fn test_multi_line_fields() {
        let multi: Vec<_> = BODY_SCHEMA
            .iter()
            .filter(|d| d.is_multi_line())
            .map(|d| d.field)
            .collect();

        assert_eq!(
            multi,
            vec![
                BodyField::Description,
                BodyField::AssembledIn,
                BodyField::QtyPerCountry
            ]
        );
    }

    #[test]
    fn test_field_names_round_trip() {
        assert_eq!(
            BodyField::from_name("Comprising Manufacturing Part No"),
            Some(BodyField::ComprisingManufacturingPartNo)
        );
        assert_eq!(BodyField::from_name("Total"), None);
    }
}
