// src/view/mod.rs
//! Shaping records for display: derived fields, column sets, quick filter.

pub mod columns;
pub mod fields;
pub mod filter;
pub mod race;
pub mod resolve;

pub use columns::{Column, Format, CONSTRUCTOR_COLUMNS, DRIVER_COLUMNS, RACE_COLUMNS};
pub use fields::{Fields, POSITION_KEY};
pub use filter::{filter_rows, RecordKind};
pub use race::{race_entries, RaceEntry};
