// src/session.rs
use anyhow::Result;
use chrono::{DateTime, Local};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, error, info, warn};

use crate::pipeline::Standings;
use crate::table::Record;

pub const FAILED_MESSAGE: &str = "Failed to load data (check CSV links in the site config).";

/// What the "last updated" line shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Loading,
    Loaded(DateTime<Local>),
    Failed,
}

impl Status {
    pub fn text(&self) -> String {
        match self {
            Status::Loading => "Loading…".to_string(),
            Status::Loaded(at) => at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
            Status::Failed => FAILED_MESSAGE.to_string(),
        }
    }
}

/// All mutable page state in one place.
///
/// Loads run without holding the session; they capture [`Session::generation`]
/// when they start and their results are dropped if a refresh happened since.
#[derive(Debug)]
pub struct Session {
    generation: u64,
    standings: Option<Arc<Standings>>,
    races: HashMap<String, Arc<Vec<Record>>>,
    status: Status,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            generation: 0,
            standings: None,
            races: HashMap::new(),
            status: Status::Loading,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn standings(&self) -> Option<Arc<Standings>> {
        self.standings.clone()
    }

    /// Drop every cached race and invalidate in-flight loads. Standings stay
    /// visible until a newer load replaces them.
    pub fn reset(&mut self) -> u64 {
        self.generation += 1;
        let dropped = self.races.len();
        self.races.clear();
        info!(generation = self.generation, dropped, "session reset");
        self.generation
    }

    /// Mark a load cycle as started; returns the generation it belongs to.
    pub fn begin_load(&mut self) -> u64 {
        self.status = Status::Loading;
        self.generation
    }

    /// Commit a standings load. Returns `false` if the result was stale.
    pub fn finish_load(&mut self, generation: u64, result: Result<Standings>) -> bool {
        if generation != self.generation {
            warn!(
                generation,
                current = self.generation,
                "discarding stale standings load"
            );
            return false;
        }
        match result {
            Ok(standings) => {
                self.status = Status::Loaded(standings.loaded_at);
                self.standings = Some(Arc::new(standings));
            }
            Err(e) => {
                error!("standings load failed: {:#}", e);
                self.status = Status::Failed;
            }
        }
        true
    }

    pub fn cached_race(&self, name: &str) -> Option<Arc<Vec<Record>>> {
        self.races.get(name).cloned()
    }

    /// Cache-if-absent. A stale generation is returned to the caller but not
    /// cached; an existing entry wins over the new one.
    pub fn store_race(&mut self, generation: u64, name: &str, records: Vec<Record>) -> Arc<Vec<Record>> {
        if generation != self.generation {
            debug!(race = name, "not caching stale race load");
            return Arc::new(records);
        }
        Arc::clone(
            self.races
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(records)),
        )
    }

    /// A race load failed; surfaces as the same status line as standings.
    pub fn race_failed(&mut self, generation: u64, name: &str, err: &anyhow::Error) {
        error!(race = name, "race load failed: {:#}", err);
        if generation == self.generation {
            self.status = Status::Failed;
        }
    }
}
