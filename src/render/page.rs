// src/render/page.rs
use std::fmt::Write;
use url::form_urlencoded;

use super::html::{escape_html, render_podium, render_table};
use crate::config::SiteConfig;
use crate::pipeline::Standings;
use crate::view::{
    filter_rows, RaceEntry, RecordKind, CONSTRUCTOR_COLUMNS, DRIVER_COLUMNS, RACE_COLUMNS,
};

pub const STYLESHEET: &str = include_str!("../../assets/site.css");

/// Rows shown in the home view's drivers preview.
const HOME_DRIVER_ROWS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Drivers,
    Constructors,
    Races,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Drivers, View::Constructors, View::Races];

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Drivers => "Drivers",
            View::Constructors => "Constructors",
            View::Races => "Races",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Drivers => "drivers",
            View::Constructors => "constructors",
            View::Races => "races",
        }
    }
}

/// Served pages link to routes; exported pages link to files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStyle {
    Server,
    Static,
}

impl LinkStyle {
    pub fn view_href(self, view: View) -> String {
        match (self, view) {
            (LinkStyle::Server, View::Home) => "/".to_string(),
            (LinkStyle::Server, v) => format!("/{}", v.slug()),
            (LinkStyle::Static, View::Home) => "index.html".to_string(),
            (LinkStyle::Static, v) => format!("{}.html", v.slug()),
        }
    }

    pub fn race_href(self, name: &str) -> String {
        match self {
            LinkStyle::Server => format!(
                "/races?race={}",
                form_urlencoded::byte_serialize(name.as_bytes()).collect::<String>()
            ),
            LinkStyle::Static => format!("race-{}.html", race_slug(name)),
        }
    }

    fn stylesheet_href(self) -> &'static str {
        match self {
            LinkStyle::Server => "/static/site.css",
            LinkStyle::Static => "site.css",
        }
    }
}

/// File-name-safe race name: lowercase ASCII alphanumerics joined by `-`.
pub fn race_slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            dash = false;
        } else if !dash && !out.is_empty() {
            out.push('-');
            dash = true;
        }
    }
    let out = out.trim_end_matches('-').to_string();
    if out.is_empty() {
        "race".to_string()
    } else {
        out
    }
}

/// The race currently shown in the races view.
pub struct RaceSelection<'a> {
    pub name: &'a str,
    pub entries: Vec<RaceEntry>,
}

/// Everything one page render needs, borrowed from the app state.
pub struct PageModel<'a> {
    pub view: View,
    pub config: &'a SiteConfig,
    pub standings: Option<&'a Standings>,
    pub status: String,
    pub race: Option<RaceSelection<'a>>,
    pub query: Option<&'a str>,
    pub links: LinkStyle,
}

pub fn render_page(m: &PageModel<'_>) -> String {
    let mut out = String::with_capacity(16 * 1024);
    let title = escape_html(m.config.title());
    let body_class = if m.view == View::Home { "" } else { " class=\"hide-hero\"" };

    let _ = write!(
        out,
        r#"<!doctype html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><link rel="stylesheet" href="{css}"></head><body{body_class}>"#,
        css = m.links.stylesheet_href(),
    );

    topbar(&mut out, m, &title);
    if m.view == View::Home {
        hero(&mut out, m);
    }

    out.push_str(r#"<main id="mainContent">"#);
    let _ = write!(out, r#"<section class="view is-active" id="view-{}">"#, m.view.slug());
    match m.view {
        View::Home => home(&mut out, m),
        View::Drivers => drivers(&mut out, m),
        View::Constructors => constructors(&mut out, m),
        View::Races => races(&mut out, m),
    }
    out.push_str("</section></main></body></html>");
    out
}

fn topbar(out: &mut String, m: &PageModel<'_>, title: &str) {
    let _ = write!(out, r#"<header class="topbar"><div class="brand">{}</div><nav>"#, title);
    for v in View::ALL {
        let active = if v == m.view { " is-active" } else { "" };
        let _ = write!(
            out,
            r#"<a class="nav__btn{}" data-view="{}" href="{}">{}</a>"#,
            active,
            v.slug(),
            m.links.view_href(v),
            v.label()
        );
    }
    out.push_str("</nav><div class=\"topbar__actions\">");
    let _ = write!(
        out,
        r#"<a id="sheetLink" href="{}" target="_blank" rel="noopener">Open sheet</a>"#,
        escape_html(m.config.sheet_link())
    );
    if m.links == LinkStyle::Server {
        out.push_str(r#"<form method="post" action="/refresh"><button id="refreshBtn" type="submit">Refresh</button></form>"#);
    }
    let _ = write!(
        out,
        r#"<span id="lastUpdated">{}</span></div></header>"#,
        escape_html(&m.status)
    );
}

fn count_label(n: usize) -> String {
    if n == 0 {
        "—".to_string()
    } else {
        n.to_string()
    }
}

fn hero(out: &mut String, m: &PageModel<'_>) {
    let next = &m.config.next_race;
    let (drivers, ctors) = m
        .standings
        .map(|s| (s.drivers.len(), s.constructors.len()))
        .unwrap_or((0, 0));
    let _ = write!(
        out,
        r#"<section class="hero"><div class="card nextRace"><h2>Next Race</h2><div id="nextRaceName">{}</div><div id="nextRaceTime">{}</div><p id="nextRaceNote">{}</p></div><div class="stats"><div><span id="driverCount">{}</span> drivers</div><div><span id="constructorCount">{}</span> constructors</div></div></section>"#,
        escape_html(&next.name),
        escape_html(&next.time),
        escape_html(&next.note),
        count_label(drivers),
        count_label(ctors),
    );
}

fn home(out: &mut String, m: &PageModel<'_>) {
    let (podium, drivers_top, ctors) = match m.standings {
        Some(s) => (
            render_podium(s.podium()),
            render_table(DRIVER_COLUMNS, &s.drivers[..s.drivers.len().min(HOME_DRIVER_ROWS)]),
            render_table(CONSTRUCTOR_COLUMNS, &s.constructors),
        ),
        None => (
            render_podium(&[]),
            render_table::<RaceEntry>(DRIVER_COLUMNS, &[]),
            render_table::<RaceEntry>(CONSTRUCTOR_COLUMNS, &[]),
        ),
    };
    let _ = write!(
        out,
        r#"<div class="grid"><div class="card"><h2>Podium</h2><div id="podium">{podium}</div></div><div class="card"><h2>Drivers</h2><table id="driversTableHome">{drivers_top}</table></div><div class="card"><h2>Constructors</h2><table id="constructorsTableHome">{ctors}</table></div></div>"#
    );
}

fn filter_form(out: &mut String, m: &PageModel<'_>, id: &str, action: View, race: Option<&str>) {
    if m.links != LinkStyle::Server {
        return;
    }
    let _ = write!(out, r#"<form class="filter" method="get" action="{}">"#, m.links.view_href(action));
    if let Some(name) = race {
        let _ = write!(out, r#"<input type="hidden" name="race" value="{}">"#, escape_html(name));
    }
    let _ = write!(
        out,
        r#"<input id="{}" type="search" name="q" placeholder="Quick Filter" value="{}"><button type="submit">Filter</button></form>"#,
        id,
        escape_html(m.query.unwrap_or(""))
    );
}

fn drivers(out: &mut String, m: &PageModel<'_>) {
    out.push_str(r#"<div class="card"><h2>Drivers Standings</h2>"#);
    filter_form(out, m, "driversFilter", View::Drivers, None);
    let table = match m.standings {
        Some(s) => render_table(DRIVER_COLUMNS, &filter_rows(&s.drivers, RecordKind::Driver, m.query)),
        None => render_table::<RaceEntry>(DRIVER_COLUMNS, &[]),
    };
    let _ = write!(out, r#"<table id="driversTable">{}</table></div>"#, table);
}

fn constructors(out: &mut String, m: &PageModel<'_>) {
    out.push_str(r#"<div class="card"><h2>Constructors Standings</h2>"#);
    filter_form(out, m, "constructorsFilter", View::Constructors, None);
    let table = match m.standings {
        Some(s) => render_table(
            CONSTRUCTOR_COLUMNS,
            &filter_rows(&s.constructors, RecordKind::Constructor, m.query),
        ),
        None => render_table::<RaceEntry>(CONSTRUCTOR_COLUMNS, &[]),
    };
    let _ = write!(out, r#"<table id="constructorsTable">{}</table></div>"#, table);
}

fn races(out: &mut String, m: &PageModel<'_>) {
    out.push_str(r#"<div class="card"><h2>Race Results</h2>"#);
    race_picker(out, m);

    let selected = m.race.as_ref();
    filter_form(out, m, "raceFilter", View::Races, selected.map(|r| r.name));

    match selected {
        Some(race) => {
            let rows = filter_rows(&race.entries, RecordKind::RaceResult, m.query);
            let _ = write!(
                out,
                r#"<p id="latestRaceSummary">Currently viewing: {}</p><table id="raceTable">{}</table><p id="raceFootnote">Tip: Use Quick Filter to find a driver/team instantly.</p>"#,
                escape_html(race.name),
                render_table(RACE_COLUMNS, &rows)
            );
        }
        None => {
            let _ = write!(
                out,
                r#"<table id="raceTable">{}</table>"#,
                render_table::<RaceEntry>(RACE_COLUMNS, &[])
            );
        }
    }
    out.push_str("</div>");
}

fn race_picker(out: &mut String, m: &PageModel<'_>) {
    let races = &m.config.races;
    let current = m.race.as_ref().map(|r| r.name);

    if m.links == LinkStyle::Static {
        out.push_str(r#"<ul class="raceList">"#);
        for r in races {
            let active = if Some(r.name.as_str()) == current { " class=\"is-active\"" } else { "" };
            let _ = write!(
                out,
                r#"<li{}><a href="{}">{}</a></li>"#,
                active,
                m.links.race_href(&r.name),
                escape_html(&r.name)
            );
        }
        if races.is_empty() {
            out.push_str("<li>No races configured yet</li>");
        }
        out.push_str("</ul>");
        return;
    }

    out.push_str(r#"<form class="racePicker" method="get" action="/races"><select id="raceSelect" name="race" onchange="this.form.submit()">"#);
    if races.is_empty() {
        out.push_str(r#"<option value="">No races configured yet</option>"#);
    }
    for r in races {
        let selected = if Some(r.name.as_str()) == current { " selected" } else { "" };
        let name = escape_html(&r.name);
        let _ = write!(out, r#"<option value="{name}"{selected}>{name}</option>"#);
    }
    out.push_str(r#"</select><noscript><button type="submit">Show</button></noscript></form>"#);
}
