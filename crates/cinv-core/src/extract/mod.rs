//! Invoice field extraction: scalar label lookups and line-item table
//! segmentation.

pub mod aggregate;
pub mod boundary;
pub mod locator;
pub mod patterns;
pub mod scanner;
pub mod segmenter;

pub use aggregate::RecordAggregator;
pub use boundary::{Boundary, BoundaryContext};
pub use locator::{locate_body, BodyLocator};
pub use scanner::scan_key_values;
pub use segmenter::{segment_body, AccumulatorHistory, FieldSegmenter, TokenStream};
