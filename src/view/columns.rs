// src/view/columns.rs
use super::fields::{Fields, POSITION_KEY};
use super::race::{POINTS_KEY, TEAM_KEY};
use crate::render::escape_html;

/// Turns a raw value (plus its whole row) into trusted markup.
pub type Format = fn(&str, &dyn Fields) -> String;

/// One displayed column: which field, what header, optional cell markup.
#[derive(Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub format: Option<Format>,
}

impl Column {
    pub const fn plain(key: &'static str, label: &'static str) -> Self {
        Self { key, label, format: None }
    }

    pub const fn formatted(key: &'static str, label: &'static str, format: Format) -> Self {
        Self { key, label, format: Some(format) }
    }

    /// Display cell for `row`: escaped text, or the formatter's output as-is.
    pub fn cell(&self, row: &dyn Fields) -> String {
        let raw = row.text(self.key);
        match self.format {
            Some(format) => format(&raw, row),
            None => escape_html(&raw),
        }
    }
}

/// Red points badge; an empty value shows as `0`.
pub fn points_badge(value: &str, _row: &dyn Fields) -> String {
    let shown = if value.is_empty() { "0" } else { value };
    format!(r#"<span class="badge badge--red">{}</span>"#, escape_html(shown))
}

pub const DRIVER_COLUMNS: &[Column] = &[
    Column::plain(POSITION_KEY, "Pos"),
    Column::plain("Driver Name", "Driver"),
    Column::plain("Team (registered)", "Team"),
    Column::formatted("Total", "Points", points_badge),
];

pub const CONSTRUCTOR_COLUMNS: &[Column] = &[
    Column::plain(POSITION_KEY, "Pos"),
    Column::plain("Team", "Constructor"),
    Column::formatted("Total", "Points", points_badge),
];

pub const RACE_COLUMNS: &[Column] = &[
    Column::plain("Pos", "Pos"),
    Column::plain("Driver Name", "Driver"),
    Column::plain("EA / RaceNet ID", "RaceNet ID"),
    Column::plain(TEAM_KEY, "Team"),
    Column::plain("Race Time / Gap", "Time / Gap"),
    Column::plain("Finish Status", "Status"),
    Column::formatted(POINTS_KEY, "Pts", points_badge),
    Column::plain("Notes", "Notes"),
];
