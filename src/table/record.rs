// src/table/record.rs
use std::sync::Arc;

use super::parse::Row;

/// One data row keyed by its source's header.
///
/// All records mapped from the same sheet share one header allocation, so the
/// key set is fixed per source. Missing trailing cells are stored as `""`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    header: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// Pair `header[i]` with `cells[i]`, trimming every value.
    pub fn new(header: Arc<[String]>, cells: &[String]) -> Self {
        let values = (0..header.len())
            .map(|i| cells.get(i).map(|c| c.trim().to_string()).unwrap_or_default())
            .collect();
        Self { header, values }
    }

    /// Value for `key`, or `None` when the sheet has no such column.
    /// A header name that appears twice resolves to its last column.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .rposition(|h| h == key)
            .map(|i| self.values[i].as_str())
    }

    /// Value for `key`, `""` when absent.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// `(name, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }

    fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.is_empty())
    }
}

/// First row is the header (trimmed); every later row becomes a [`Record`].
/// Rows whose values are all empty after trimming are dropped.
pub fn to_records(rows: Vec<Row>) -> Vec<Record> {
    let mut rows = rows.into_iter();
    let header: Arc<[String]> = match rows.next() {
        Some(h) => h.iter().map(|c| c.trim().to_string()).collect(),
        None => return Vec::new(),
    };

    rows.map(|r| Record::new(Arc::clone(&header), &r))
        .filter(|rec| !rec.is_blank())
        .collect()
}
