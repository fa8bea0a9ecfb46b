//! Line-item table segmentation.
//!
//! Text extraction flattens the table into one cell per line with no column
//! separators. The header lines are skipped up to the last header cell, and
//! the remaining lines are dealt out to the columns of [`BODY_SCHEMA`] in
//! order. Single-line columns take one line each; multi-line columns take
//! lines until their [`Boundary`](super::boundary::Boundary) says the next
//! line belongs to the following column.

use tracing::{debug, trace};

use super::boundary::BoundaryContext;
use crate::models::record::SegmentedBody;
use crate::models::schema::{SchemaFieldDefinition, BODY_SCHEMA};

/// Last header cell of the table; values start right after it.
pub const HEADER_TERMINATOR: &str = "Line Total";

/// Trimmed, non-empty lines of a table span with a forward-only cursor.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: Vec<&'a str>,
    cursor: usize,
}

impl<'a> TokenStream<'a> {
    /// Split a span into trimmed, non-empty lines.
    pub fn from_span(span: &'a str) -> Self {
        Self::from_tokens(span.lines().map(str::trim).filter(|l| !l.is_empty()).collect())
    }

    pub fn from_tokens(tokens: Vec<&'a str>) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Move the cursor just past the first token equal to `marker`.
    ///
    /// Returns `false`, leaving the cursor alone, when there is no such token.
    pub fn skip_past(&mut self, marker: &str) -> bool {
        match self.tokens[self.cursor..].iter().position(|t| *t == marker) {
            Some(offset) => {
                self.cursor += offset + 1;
                true
            }
            None => false,
        }
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.cursor).copied()
    }

    /// Consume the next token.
    pub fn advance(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

/// Lines collected by the most recent multi-line column, handed to the next
/// multi-line column's boundary.
#[derive(Debug, Clone, Default)]
pub struct AccumulatorHistory<'a> {
    previous: Vec<&'a str>,
}

impl<'a> AccumulatorHistory<'a> {
    pub fn previous(&self) -> &[&'a str] {
        &self.previous
    }

    /// Replace the history with a finished column's lines.
    pub fn record(&mut self, lines: Vec<&'a str>) {
        self.previous = lines;
    }
}

/// Splits a line-item table span into its columns.
#[derive(Debug, Clone)]
pub struct FieldSegmenter {
    header_terminator: String,
    schema: &'static [SchemaFieldDefinition],
}

impl FieldSegmenter {
    /// Create a segmenter for the standard table layout.
    pub fn new() -> Self {
        Self {
            header_terminator: HEADER_TERMINATOR.to_string(),
            schema: &BODY_SCHEMA,
        }
    }

    /// Use a different last header cell.
    pub fn with_header_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.header_terminator = terminator.into();
        self
    }

    /// Segment a table span.
    ///
    /// Returns `None` when the span has no header terminator, so values
    /// cannot be told apart from header cells.
    pub fn segment(&self, span: &str) -> Option<SegmentedBody> {
        let mut stream = TokenStream::from_span(span);
        if !stream.skip_past(&self.header_terminator) {
            debug!("No '{}' header cell in table span", self.header_terminator);
            return None;
        }

        trace!(
            "Table span: {} header tokens, {} value tokens",
            stream.cursor(),
            stream.remaining()
        );

        let mut body = SegmentedBody::new();
        let mut history = AccumulatorHistory::default();

        for def in self.schema {
            let value = match def.boundary {
                None => stream.advance().map(str::to_string),
                Some(boundary) => {
                    if stream.is_exhausted() {
                        history.record(Vec::new());
                        None
                    } else {
                        let mut lines: Vec<&str> = Vec::new();
                        loop {
                            let ctx = BoundaryContext {
                                tokens: stream.tokens(),
                                cursor: stream.cursor(),
                                previous: history.previous(),
                                current: &lines,
                            };
                            if ctx.next_token().is_none() || boundary.should_stop(&ctx) {
                                break;
                            }
                            if let Some(token) = stream.advance() {
                                lines.push(token);
                            }
                        }
                        let value = lines.join(def.join_separator);
                        history.record(lines);
                        Some(value)
                    }
                }
            };

            trace!("{} = {:?}", def.field.name(), value);
            body.set(def.field, value);
        }

        body.surplus = stream.remaining();
        if body.surplus > 0 {
            debug!("{} table tokens left after the last column", body.surplus);
        }

        Some(body)
    }
}

impl Default for FieldSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Segment a table span with the standard layout.
pub fn segment_body(span: &str) -> Option<SegmentedBody> {
    FieldSegmenter::new().segment(span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schema::BodyField;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Line\nMarketing\nPart\nNumber\nDescription\nComprising\nManufacturing\nPart\nNo\nAssembled\nIn\nQty\nPer\nCountry\nShipped\nQty\nUnit\nPrice\nLine Total\n";

    fn span(values: &[&str]) -> String {
        format!("{}{}\n", HEADER, values.join("\n"))
    }

    fn values(body: &SegmentedBody) -> Vec<Option<&str>> {
        body.iter().map(|(_, v)| v).collect()
    }

    #[test]
    fn test_single_country_line_item() {
        let body = segment_body(&span(&[
            "1",
            "MKT-001",
            "Widget Assembly",
            "1234567-890123",
            "CN China",
            "10",
            "10",
            "100.00",
            "1,000.00",
        ]))
        .unwrap();

        assert_eq!(body.get(BodyField::Description), Some("Widget Assembly"));
        assert_eq!(body.get(BodyField::ComprisingManufacturingPartNo), Some("1234567-890123"));
        assert_eq!(body.get(BodyField::AssembledIn), Some("CN China"));
        assert_eq!(body.get(BodyField::QtyPerCountry), Some("10"));
        assert_eq!(body.get(BodyField::ShippedQty), Some("10"));
        assert_eq!(body.get(BodyField::UnitPrice), Some("100.00"));
        assert_eq!(body.get(BodyField::LineTotal), Some("1,000.00"));
        assert_eq!(body.surplus, 0);
    }

    #[test]
    fn test_unambiguous_values_come_back_verbatim() {
        let tokens = [
            "7",
            "MKT-ABC",
            "Server",
            "7654321-12345",
            "US United States",
            "2",
            "2",
            "50.00",
            "100.00",
        ];
        let body = segment_body(&span(&tokens)).unwrap();

        assert_eq!(values(&body), tokens.iter().map(|t| Some(*t)).collect::<Vec<_>>());
    }

    #[test]
    fn test_multi_line_columns() {
        let body = segment_body(&span(&[
            "2",
            "MKT-002",
            "Rack Mount",
            "Kit, Black",
            "2345678-123456",
            "CN China",
            "MY Malaysia",
            "6",
            "4",
            "10",
            "25.00",
            "250.00",
        ]))
        .unwrap();

        assert_eq!(body.get(BodyField::Description), Some("Rack Mount Kit, Black"));
        assert_eq!(body.get(BodyField::AssembledIn), Some("CN China MY Malaysia"));
        assert_eq!(body.get(BodyField::QtyPerCountry), Some("6 4"));
        assert_eq!(body.get(BodyField::ShippedQty), Some("10"));
        assert_eq!(body.get(BodyField::LineTotal), Some("250.00"));
    }

    #[test]
    fn test_description_stops_at_number() {
        let body = segment_body(&span(&["3", "MKT-003", "Cable", "5", "CN China"])).unwrap();

        assert_eq!(body.get(BodyField::Description), Some("Cable"));
        assert_eq!(body.get(BodyField::ComprisingManufacturingPartNo), Some("5"));
        assert_eq!(body.get(BodyField::AssembledIn), Some("CN China"));
        assert_eq!(body.get(BodyField::QtyPerCountry), None);
    }

    #[test]
    fn test_missing_header_terminator() {
        assert_eq!(segment_body("Line\nMarketing\n1\nMKT-001\n"), None);
        assert_eq!(segment_body(""), None);
    }

    #[test]
    fn test_shortfall_nulls_trailing_columns() {
        let body = segment_body(&span(&["1", "MKT-001"])).unwrap();

        assert_eq!(body.get(BodyField::Line), Some("1"));
        assert_eq!(body.get(BodyField::MarketingPartNumber), Some("MKT-001"));
        for field in &BodyField::ALL[2..] {
            assert_eq!(body.get(*field), None);
        }
    }

    #[test]
    fn test_exhaustion_mid_column() {
        let body = segment_body(&span(&["1", "MKT-001", "Widget", "Assembly"])).unwrap();

        assert_eq!(body.get(BodyField::Description), Some("Widget Assembly"));
        assert_eq!(body.get(BodyField::ComprisingManufacturingPartNo), None);
    }

    #[test]
    fn test_empty_multi_line_column() {
        let body = segment_body(&span(&["1", "MKT-001", "1234567-890123", "CN China", "10"])).unwrap();

        assert_eq!(body.get(BodyField::Description), Some(""));
        assert_eq!(body.get(BodyField::ComprisingManufacturingPartNo), Some("1234567-890123"));
    }

    #[test]
    fn test_surplus_tokens_are_counted() {
        let body = segment_body(&span(&[
            "1",
            "MKT-001",
            "Widget Assembly",
            "1234567-890123",
            "CN China",
            "10",
            "CN China",
            "10",
            "100.00",
            "1,000.00",
        ]))
        .unwrap();

        assert_eq!(body.get(BodyField::QtyPerCountry), Some("10"));
        assert_eq!(body.surplus, 1);
    }

    #[test]
    fn test_blank_lines_and_padding_ignored() {
        let body = segment_body("Line\n  Line Total  \n\n  1 \n\n MKT-9 \n").unwrap();

        assert_eq!(body.get(BodyField::Line), Some("1"));
        assert_eq!(body.get(BodyField::MarketingPartNumber), Some("MKT-9"));
    }

    #[test]
    fn test_token_stream_cursor() {
        let mut stream = TokenStream::from_span("a\n\n b \nc");
        assert_eq!(stream.tokens(), &["a", "b", "c"]);
        assert!(stream.skip_past("b"));
        assert_eq!(stream.peek(), Some("c"));
        assert!(!stream.skip_past("a"));
        assert_eq!(stream.advance(), Some("c"));
        assert!(stream.is_exhausted());
        assert_eq!(stream.advance(), None);
    }
}
