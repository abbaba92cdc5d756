// src/pipeline.rs
//! fetch → parse → map → rank, one stage after another.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{info, instrument};

use crate::config::{RaceSource, SiteConfig};
use crate::fetch::{fetch_records, TextSource};
use crate::rank::{rank_by_total, Ranked, TOTAL_KEY};
use crate::table::Record;

/// Ranked championship tables from one load cycle.
#[derive(Clone, Debug)]
pub struct Standings {
    pub drivers: Vec<Ranked<Record>>,
    pub constructors: Vec<Ranked<Record>>,
    pub loaded_at: DateTime<Local>,
}

impl Standings {
    pub fn podium(&self) -> &[Ranked<Record>] {
        &self.drivers[..self.drivers.len().min(3)]
    }
}

/// Drivers first, then constructors; the first failure aborts the cycle.
#[instrument(level = "info", skip_all)]
pub async fn load_standings<S: TextSource>(source: &S, config: &SiteConfig) -> Result<Standings> {
    let drivers = fetch_records(source, config.drivers_csv.as_deref())
        .await
        .context("loading drivers standings")?;
    let constructors = fetch_records(source, config.constructors_csv.as_deref())
        .await
        .context("loading constructors standings")?;

    let standings = Standings {
        drivers: rank_by_total(&drivers, TOTAL_KEY),
        constructors: rank_by_total(&constructors, TOTAL_KEY),
        loaded_at: Local::now(),
    };
    info!(
        drivers = standings.drivers.len(),
        constructors = standings.constructors.len(),
        "standings ranked"
    );
    Ok(standings)
}

#[instrument(level = "info", skip(source), fields(race = %race.name))]
pub async fn load_race<S: TextSource>(source: &S, race: &RaceSource) -> Result<Vec<Record>> {
    fetch_records(source, race.csv.as_deref())
        .await
        .with_context(|| format!("loading race {}", race.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::MemorySource;

    const DRIVERS: &str = "Driver Name,Team (registered),Total\n\
                           Alice,Red Bull,25\n\
                           Bruno,Ferrari,40\n\
                           Chen,McLaren,10\n";

    fn config() -> SiteConfig {
        SiteConfig {
            drivers_csv: Some("https://x/drivers.csv".into()),
            constructors_csv: Some("https://x/ctors.csv".into()),
            ..SiteConfig::default()
        }
    }

    #[tokio::test]
    async fn standings_are_ranked_by_total() -> Result<()> {
        let src = MemorySource::with(&[
            ("https://x/drivers.csv", DRIVERS),
            ("https://x/ctors.csv", "Team,Total\nFerrari,40\nRed Bull,25\nMcLaren,30\n"),
        ]);
        let standings = load_standings(&src, &config()).await?;

        let podium: Vec<_> = standings
            .podium()
            .iter()
            .map(|r| (r.position, r.item.value("Driver Name")))
            .collect();
        assert_eq!(podium, vec![(1, "Bruno"), (2, "Alice"), (3, "Chen")]);

        let teams: Vec<_> = standings.constructors.iter().map(|r| r.item.value("Team")).collect();
        assert_eq!(teams, vec!["Ferrari", "McLaren", "Red Bull"]);
        Ok(())
    }

    #[tokio::test]
    async fn constructors_failure_aborts_the_cycle() {
        let src = MemorySource::with(&[("https://x/drivers.csv", DRIVERS)]);
        let err = load_standings(&src, &config()).await.unwrap_err();
        assert!(format!("{:#}", err).contains("constructors"));
    }

    #[tokio::test]
    async fn unconfigured_site_loads_empty() -> Result<()> {
        let src = MemorySource::default();
        let standings = load_standings(&src, &SiteConfig::default()).await?;
        assert!(standings.drivers.is_empty());
        assert!(standings.podium().is_empty());
        assert_eq!(src.hits(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn race_without_url_is_empty() -> Result<()> {
        let src = MemorySource::default();
        let race = RaceSource { name: "R1".into(), csv: None };
        assert!(load_race(&src, &race).await?.is_empty());
        Ok(())
    }
}
