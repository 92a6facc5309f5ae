//! pino-ingest: free-text expense log extraction and per-format field parsers.

pub mod extractor;
pub mod matchers;
pub mod parsers;

pub use extractor::{DELIMITER, RawBlock, extract_blocks, normalize};
pub use matchers::{DistanceMatch, DistanceMatcher, HeaderMatch, HeaderMatcher};
pub use parsers::delimited::parse_expense_text;
pub use parsers::plain::parse_plain_text;
