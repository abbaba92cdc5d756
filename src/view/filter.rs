// src/view/filter.rs
use super::fields::Fields;
use super::race::TEAM_KEY;

/// Which sheet a row came from; decides the fields a quick filter searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Driver,
    Constructor,
    RaceResult,
}

impl RecordKind {
    pub fn searched_fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::Driver => &["Driver Name", "Team (registered)", "Team"],
            RecordKind::Constructor => &["Team"],
            RecordKind::RaceResult => &[
                "Driver Name",
                "EA / RaceNet ID",
                TEAM_KEY,
                "Notes",
                "Finish Status",
            ],
        }
    }
}

/// Trimmed, lowercased query; `None` when there is nothing to filter on.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    let q = query?.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

/// Searched fields joined by a space and lowercased.
pub fn haystack(row: &dyn Fields, kind: RecordKind) -> String {
    kind.searched_fields()
        .iter()
        .map(|k| row.text(k))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Rows whose searched fields contain `query`, case-insensitively.
/// A missing or blank query keeps every row.
pub fn filter_rows<'a, T: Fields>(rows: &'a [T], kind: RecordKind, query: Option<&str>) -> Vec<&'a T> {
    match normalize_query(query) {
        None => rows.iter().collect(),
        Some(needle) => rows
            .iter()
            .filter(|r| haystack(*r, kind).contains(&needle))
            .collect(),
    }
}
