// src/export.rs
//! Static export: every page rendered once with file links, written to a directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

use crate::config::SiteConfig;
use crate::fetch::TextSource;
use crate::pipeline::{load_race, load_standings, Standings};
use crate::render::{render_page, LinkStyle, PageModel, RaceSelection, View, STYLESHEET};
use crate::session::{Status, FAILED_MESSAGE};
use crate::table::Record;
use crate::view::race_entries;

/// Page file for a view in the exported site.
fn view_file(view: View) -> String {
    LinkStyle::Static.view_href(view)
}

struct Exporter<'a> {
    config: &'a SiteConfig,
    standings: &'a Standings,
    out_dir: &'a Path,
    written: Vec<PathBuf>,
}

impl Exporter<'_> {
    async fn write(&mut self, name: &str, body: &str) -> Result<()> {
        let path = self.out_dir.join(name);
        fs::write(&path, body)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), bytes = body.len(), "wrote page");
        self.written.push(path);
        Ok(())
    }

    fn page(&self, view: View, race: Option<(&str, &[Record])>, failed: bool) -> String {
        let status = if failed {
            FAILED_MESSAGE.to_string()
        } else {
            Status::Loaded(self.standings.loaded_at).text()
        };
        render_page(&PageModel {
            view,
            config: self.config,
            standings: Some(self.standings),
            status,
            race: race.map(|(name, records)| RaceSelection {
                name,
                entries: race_entries(records),
            }),
            query: None,
            links: LinkStyle::Static,
        })
    }
}

/// Load the standings and every configured race, then write `index.html`,
/// `drivers.html`, `constructors.html`, `races.html` (latest race), one
/// `race-<slug>.html` per race and `site.css` into `out_dir`.
///
/// An invalid config or a standings failure aborts before anything is written. A race failure is
/// logged and that race's page carries the failure status.
#[instrument(level = "info", skip_all, fields(out_dir = %out_dir.display()))]
pub async fn export_site<S: TextSource>(
    source: &S,
    config: &SiteConfig,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    // 1) page names must not collide; then standings, nothing to publish without them
    config.validate()?;
    let standings = load_standings(source, config).await?;

    // 2) every race, in configured order
    let mut races = Vec::with_capacity(config.races.len());
    for race in &config.races {
        match load_race(source, race).await {
            Ok(records) => races.push((race.name.as_str(), Some(records))),
            Err(e) => {
                error!("{:#}", e);
                races.push((race.name.as_str(), None));
            }
        }
    }

    // 3) write pages
    fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut ex = Exporter {
        config,
        standings: &standings,
        out_dir,
        written: Vec::new(),
    };

    for view in [View::Home, View::Drivers, View::Constructors] {
        let html = ex.page(view, None, false);
        ex.write(&view_file(view), &html).await?;
    }

    let mut latest = ex.page(View::Races, None, false);
    for (name, records) in &races {
        let html = match records {
            Some(r) => ex.page(View::Races, Some((*name, r.as_slice())), false),
            None => ex.page(View::Races, None, true),
        };
        ex.write(&LinkStyle::Static.race_href(name), &html).await?;
        latest = html;
    }
    ex.write(&view_file(View::Races), &latest).await?;

    ex.write("site.css", STYLESHEET).await?;

    info!(pages = ex.written.len(), "static export finished");
    Ok(ex.written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RaceSource;
    use crate::fetch::testing::MemorySource;

    const DRIVERS_URL: &str = "https://sheets.test/drivers.csv";
    const CTORS_URL: &str = "https://sheets.test/ctors.csv";
    const R1_URL: &str = "https://sheets.test/r1.csv";
    const R2_URL: &str = "https://sheets.test/r2.csv";

    fn config() -> SiteConfig {
        SiteConfig {
            drivers_csv: Some(DRIVERS_URL.into()),
            constructors_csv: Some(CTORS_URL.into()),
            races: vec![
                RaceSource { name: "R1 – Australia".into(), csv: Some(R1_URL.into()) },
                RaceSource { name: "R2 – China".into(), csv: Some(R2_URL.into()) },
            ],
            ..SiteConfig::default()
        }
    }

    fn source() -> MemorySource {
        MemorySource::with(&[
            (DRIVERS_URL, "Driver Name,Team (registered),Total\nAlice,Red Bull,25\nBruno,Ferrari,40\n"),
            (CTORS_URL, "Team,Total\nFerrari,40\nRed Bull,25\n"),
            (R1_URL, "Pos,Driver Name,Team,Pts\n1,Bruno,Ferrari,25\n"),
            (R2_URL, "Pos,Driver Name,Team,Pts\n1,Alice,Red Bull,25\n"),
        ])
    }

    #[tokio::test]
    async fn writes_every_page_with_file_links() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_site(&source(), &config(), dir.path()).await.unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "index.html",
                "drivers.html",
                "constructors.html",
                "race-r1-australia.html",
                "race-r2-china.html",
                "races.html",
                "site.css",
            ]
        );

        let index = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains(r#"href="drivers.html""#));
        assert!(index.contains(r#"href="site.css""#));
        assert!(!index.contains("/refresh"));

        let latest = std::fs::read_to_string(dir.path().join("races.html")).unwrap();
        assert!(latest.contains("Currently viewing: R2 – China"));
    }

    #[tokio::test]
    async fn failed_race_still_gets_a_page() {
        let src = source();
        src.remove(R1_URL);
        let dir = tempfile::tempdir().unwrap();
        export_site(&src, &config(), dir.path()).await.unwrap();

        let r1 = std::fs::read_to_string(dir.path().join("race-r1-australia.html")).unwrap();
        assert!(r1.contains(FAILED_MESSAGE));
        assert!(!r1.contains("Currently viewing"));
    }

    #[tokio::test]
    async fn standings_failure_writes_nothing() {
        let src = source();
        src.remove(DRIVERS_URL);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("site");

        assert!(export_site(&src, &config(), &out).await.is_err());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn colliding_race_pages_are_rejected() {
        let mut cfg = config();
        cfg.races[1].name = "R1 - Australia".into();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("site");

        let err = export_site(&source(), &cfg, &out).await.unwrap_err();
        assert!(err.to_string().contains("same page name"));
        assert!(!out.exists());
    }
}
