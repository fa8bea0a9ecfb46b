//! Data models: field lookups, the line-item schema, records, and configuration.

pub mod config;
pub mod fields;
pub mod record;
pub mod schema;

pub use config::CinvConfig;
pub use fields::{FieldItem, FieldRegistry, ScalarValues, ValueKind};
pub use record::{InvoiceRecord, SegmentedBody};
pub use schema::{BodyField, SchemaFieldDefinition, BODY_SCHEMA};
