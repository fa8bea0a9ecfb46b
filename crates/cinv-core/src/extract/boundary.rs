//! Boundary classifiers for multi-line table columns.
//!
//! A multi-line column has no separator of its own: it ends where the next
//! token looks like it belongs to the following column. Each multi-line
//! column in [`BODY_SCHEMA`](crate::models::BODY_SCHEMA) carries the
//! [`Boundary`] that makes that call.

use super::patterns::{is_numeric_token, COUNTRY_LINE, MFG_PART_NUMBER};

/// Everything a boundary may look at before the next token is consumed.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryContext<'a> {
    /// The whole value token stream.
    pub tokens: &'a [&'a str],
    /// Index of the next unconsumed token.
    pub cursor: usize,
    /// Lines collected by the preceding multi-line column.
    pub previous: &'a [&'a str],
    /// Lines collected so far by this column.
    pub current: &'a [&'a str],
}

impl<'a> BoundaryContext<'a> {
    /// The token that would be consumed next.
    pub fn next_token(&self) -> Option<&'a str> {
        self.tokens.get(self.cursor).copied()
    }
}

/// Rule deciding where a multi-line column ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Stop at a numeric token or a manufacturing part number.
    NumberOrPartNumber,
    /// Stop at a numeric token.
    Number,
    /// Stop once there is one quantity line per country line collected by
    /// the preceding column.
    OneQuantityPerCountry,
}

impl Boundary {
    /// Whether the next token starts the following column.
    ///
    /// Pure: the same context always gives the same answer.
    pub fn should_stop(&self, ctx: &BoundaryContext<'_>) -> bool {
        match self {
            Boundary::NumberOrPartNumber => ctx
                .next_token()
                .is_some_and(|t| is_numeric_token(t) || MFG_PART_NUMBER.is_match(t)),
            Boundary::Number => ctx.next_token().is_some_and(is_numeric_token),
            Boundary::OneQuantityPerCountry => {
                if ctx.previous.is_empty() || ctx.current.is_empty() {
                    return false;
                }
                let countries = ctx
                    .previous
                    .iter()
                    .filter(|t| COUNTRY_LINE.is_match(t))
                    .count();
                countries == ctx.current.len()
            }
        }
    }
}
