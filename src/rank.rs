// src/rank.rs
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

use crate::table::Record;

/// Column holding the cumulative points in the standings sheets.
pub const TOTAL_KEY: &str = "Total";

static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]").expect("numeric strip pattern should compile"));

/// Loose numeric read of a sheet cell: drop everything except ASCII digits,
/// `.` and `-`, then parse. Unparseable or non-finite results are `0.0`.
pub fn to_number_safe(raw: &str) -> f64 {
    let stripped = NON_NUMERIC.replace_all(raw, "");
    if stripped.is_empty() {
        return 0.0;
    }
    match stripped.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// A record with its 1-based standing.
#[derive(Clone, Debug, PartialEq)]
pub struct Ranked<T> {
    pub position: usize,
    pub item: T,
}

/// Stable sort by descending numeric value of `key`; ties keep input order.
pub fn sort_by_total_desc(records: &[Record], key: &str) -> Vec<Record> {
    let mut keyed: Vec<(f64, &Record)> = records
        .iter()
        .map(|r| (to_number_safe(r.value(key)), r))
        .collect();
    // Vec::sort_by is stable
    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Sort by `key` and number the result from 1.
pub fn rank_by_total(records: &[Record], key: &str) -> Vec<Ranked<Record>> {
    sort_by_total_desc(records, key)
        .into_iter()
        .enumerate()
        .map(|(i, item)| Ranked { position: i + 1, item })
        .collect()
}
