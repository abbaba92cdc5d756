// src/app.rs
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::{RaceSource, SiteConfig};
use crate::fetch::TextSource;
use crate::pipeline::{load_race, load_standings};
use crate::render::{render_page, LinkStyle, PageModel, RaceSelection, View};
use crate::session::Session;
use crate::table::Record;
use crate::view::race_entries;

/// Config + fetcher + session, shared by every request.
pub struct App<S> {
    config: SiteConfig,
    source: S,
    session: RwLock<Session>,
}

impl<S: TextSource> App<S> {
    pub fn new(config: SiteConfig, source: S) -> Self {
        Self {
            config,
            source,
            session: RwLock::new(Session::new()),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub async fn status(&self) -> String {
        self.session.read().await.status().text()
    }

    /// Load standings, then the latest race. Returns whether the standings
    /// load succeeded and was still current when it finished.
    #[instrument(level = "info", skip(self))]
    pub async fn load_all(&self) -> bool {
        let generation = self.session.write().await.begin_load();
        let result = load_standings(&self.source, &self.config).await;
        let ok = result.is_ok();
        let committed = self.session.write().await.finish_load(generation, result);
        if !(ok && committed) {
            return false;
        }
        self.race(None).await;
        true
    }

    /// Drop every cache and load everything again.
    pub async fn refresh(&self) -> bool {
        let generation = self.session.write().await.reset();
        info!(generation, "refresh requested");
        self.load_all().await
    }

    /// Records for the named race (the latest one for `None`), served from
    /// the session cache when present. Unknown names yield `None`.
    pub async fn race(&self, name: Option<&str>) -> Option<(&RaceSource, Arc<Vec<Record>>)> {
        let race = match name {
            Some(n) => self.config.race(n)?,
            None => self.config.latest_race()?,
        };

        let (generation, cached) = {
            let session = self.session.read().await;
            (session.generation(), session.cached_race(&race.name))
        };
        if let Some(records) = cached {
            return Some((race, records));
        }

        match load_race(&self.source, race).await {
            Ok(records) => {
                let records = self
                    .session
                    .write()
                    .await
                    .store_race(generation, &race.name, records);
                Some((race, records))
            }
            Err(e) => {
                self.session
                    .write()
                    .await
                    .race_failed(generation, &race.name, &e);
                None
            }
        }
    }

    /// Full HTML for one view. For the races view, an unknown or missing
    /// race name shows the latest race.
    pub async fn render(&self, view: View, race: Option<&str>, query: Option<&str>) -> String {
        let selected = if view == View::Races {
            let name = race.filter(|n| self.config.race(n).is_some());
            self.race(name)
                .await
                .map(|(r, records)| RaceSelection {
                    name: r.name.as_str(),
                    entries: race_entries(&records),
                })
        } else {
            None
        };

        let (standings, status) = {
            let session = self.session.read().await;
            (session.standings(), session.status().text())
        };

        render_page(&PageModel {
            view,
            config: &self.config,
            standings: standings.as_deref(),
            status,
            race: selected,
            query,
            links: LinkStyle::Server,
        })
    }
}
