// src/config/mod.rs
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, info};
use url::Url;

use crate::render::page::race_slug;

/// Env var naming the YAML config file.
pub const CONFIG_ENV: &str = "RACEBOARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "raceboard.yaml";

/// Prefix used in the shipped config for links nobody has filled in yet.
const PLACEHOLDER_PREFIX: &str = "PASTE_";

/// One published race sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSource {
    pub name: String,
    #[serde(default)]
    pub csv: Option<String>,
}

/// Informational "next race" card on the home view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextRace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub note: String,
}

/// Where every sheet lives, read once at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub master_sheet_url: Option<String>,
    #[serde(default)]
    pub drivers_csv: Option<String>,
    #[serde(default)]
    pub constructors_csv: Option<String>,
    /// Ordered; the last entry is treated as the latest race.
    #[serde(default)]
    pub races: Vec<RaceSource>,
    #[serde(default)]
    pub next_race: NextRace,
}

/// `true` when `url` is unset, blank or still a placeholder.
pub fn is_unconfigured(url: Option<&str>) -> bool {
    match url.map(str::trim) {
        None => true,
        Some(u) => u.is_empty() || u.starts_with(PLACEHOLDER_PREFIX),
    }
}

impl SiteConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: SiteConfig = serde_yaml::from_str(text).context("parsing site config YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading site config {}", path.display()))?;
        let cfg = Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))?;
        info!(
            path = %path.display(),
            races = cfg.races.len(),
            "loaded site config"
        );
        Ok(cfg)
    }

    /// `$RACEBOARD_CONFIG`, falling back to `raceboard.yaml` in the working dir.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    pub fn race(&self, name: &str) -> Option<&RaceSource> {
        self.races.iter().find(|r| r.name == name)
    }

    pub fn latest_race(&self) -> Option<&RaceSource> {
        self.races.last()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Championship Standings")
    }

    /// Master sheet link for the header, `#` when unset.
    pub fn sheet_link(&self) -> &str {
        match self.master_sheet_url.as_deref() {
            Some(u) if !is_unconfigured(Some(u)) => u,
            _ => "#",
        }
    }

    /// URL syntax, duplicate race names and race page-name collisions.
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("master_sheet_url", self.master_sheet_url.as_deref()),
            ("drivers_csv", self.drivers_csv.as_deref()),
            ("constructors_csv", self.constructors_csv.as_deref()),
        ]
        .into_iter()
        .chain(self.races.iter().map(|r| (r.name.as_str(), r.csv.as_deref())));

        for (what, url) in urls {
            if is_unconfigured(url) {
                debug!(source = what, "no URL configured");
                continue;
            }
            if let Some(u) = url {
                Url::parse(u.trim()).with_context(|| format!("invalid URL for {}: {}", what, u))?;
            }
        }

        // exported race pages are named by slug, so slugs must be unique too
        let mut seen = std::collections::HashMap::new();
        for race in &self.races {
            if let Some(prev) = seen.insert(race_slug(&race.name), race.name.as_str()) {
                if prev == race.name {
                    bail!("duplicate race name {:?}", race.name);
                }
                bail!(
                    "race names {:?} and {:?} map to the same page name",
                    prev,
                    race.name
                );
            }
        }
        Ok(())
    }
}
