// src/table/mod.rs
//! Published-sheet text → rows → records.

pub mod parse;
pub mod record;

pub use parse::{parse_rows, Row};
pub use record::{to_records, Record};

/// Parse one exported sheet and map it to records in a single call.
pub fn records_from_text(text: &str) -> Vec<Record> {
    to_records(parse_rows(text))
}
