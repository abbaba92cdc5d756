// src/view/race.rs
use std::borrow::Cow;

use super::fields::Fields;
use super::resolve::resolve_or;
use crate::table::Record;

pub const TEAM_KEY: &str = "__team";
pub const POINTS_KEY: &str = "__pts";

/// Team columns seen across race sheets, most specific first.
pub const TEAM_CANDIDATES: &[&str] = &[
    "Team (Race 1)",
    "Team (Race 2)",
    "Team (Race 3)",
    "Team (Race)",
    "Team",
];

pub const POINTS_CANDIDATES: &[&str] = &["Final Points", "Final", "Pts", "Points"];

/// A race-result record with its team and points resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceEntry {
    pub record: Record,
    pub team: String,
    pub points: String,
}

impl RaceEntry {
    pub fn from_record(record: Record) -> Self {
        let team = resolve_or(&record, TEAM_CANDIDATES, "");
        let points = resolve_or(&record, POINTS_CANDIDATES, "0");
        Self { record, team, points }
    }
}

impl Fields for RaceEntry {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            TEAM_KEY => Some(Cow::Borrowed(self.team.as_str())),
            POINTS_KEY => Some(Cow::Borrowed(self.points.as_str())),
            _ => self.record.field(key),
        }
    }
}

pub fn race_entries(records: &[Record]) -> Vec<RaceEntry> {
    records.iter().cloned().map(RaceEntry::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::records_from_text;

    #[test]
    fn resolves_team_and_points_aliases() {
        let recs = records_from_text(
            "Driver Name,Team (Race),Team,Pts\nLeclerc,Ferrari (loan),Ferrari,18\nSainz,,Williams,\n",
        );
        let entries = race_entries(&recs);

        assert_eq!(entries[0].text(TEAM_KEY), "Ferrari (loan)");
        assert_eq!(entries[0].text(POINTS_KEY), "18");
        assert_eq!(entries[1].text(TEAM_KEY), "Williams");
        assert_eq!(entries[1].text(POINTS_KEY), "0");
        assert_eq!(entries[1].text("Driver Name"), "Sainz");
    }

    #[test]
    fn missing_team_columns_resolve_empty() {
        let recs = records_from_text("Driver Name\nNobody\n");
        let entry = RaceEntry::from_record(recs[0].clone());
        assert_eq!(entry.team, "");
        assert_eq!(entry.points, "0");
    }
}
