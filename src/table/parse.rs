// src/table/parse.rs
use std::mem::take;

/// One parsed line of a sheet export; position-significant.
pub type Row = Vec<String>;

/// Single-pass CSV scan honoring `"` quoting, `""` escapes and LF / CR / CRLF
/// line breaks. Never fails: any input yields a (possibly empty) row list.
///
/// - a line break with nothing accumulated is skipped, so blank and trailing
///   lines never produce empty rows
/// - an unterminated quoted field is closed implicitly at end of input
pub fn parse_rows(text: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if !field.is_empty() || !row.is_empty() {
                    row.push(take(&mut field));
                    rows.push(take(&mut row));
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
