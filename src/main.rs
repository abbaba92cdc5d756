use anyhow::Result;
use raceboard::{
    app::App,
    config::SiteConfig,
    fetch::HttpSource,
    render::{View, STYLESHEET},
};
use serde::Deserialize;
use std::{convert::Infallible, env, sync::Arc};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};
use warp::{http::Uri, reject::Rejection, reply::Reply, Filter};

type SharedApp = Arc<App<HttpSource>>;

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    race: Option<String>,
    q: Option<String>,
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "raceboard"
    })))
}

async fn page(view: View, query: PageQuery, app: SharedApp) -> Result<impl Reply, Rejection> {
    let html = app
        .render(view, query.race.as_deref(), query.q.as_deref())
        .await;
    Ok(warp::reply::html(html))
}

async fn refresh(app: SharedApp) -> Result<impl Reply, Rejection> {
    if !app.refresh().await {
        let status = app.status().await;
        warn!(%status, "refresh finished with errors");
    }
    Ok(warp::redirect::see_other(Uri::from_static("/")))
}

/// Query string if present and well-formed, otherwise an empty query.
fn page_query() -> impl Filter<Extract = (PageQuery,), Error = Infallible> + Clone {
    warp::query::<PageQuery>()
        .or(warp::any().map(PageQuery::default))
        .unify()
}

fn refresh_route(app: SharedApp) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("refresh")
        .and(warp::post())
        .and(warp::any().map(move || app.clone()))
        .and_then(refresh)
}

fn view_route(
    view: View,
    path: impl Filter<Extract = (), Error = Rejection> + Clone,
    app: SharedApp,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    path.and(warp::get())
        .and(page_query())
        .and(warp::any().map(move || app.clone()))
        .and_then(move |q, app| page(view, q, app))
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
    info!("startup");

    // ─── 2) config + app state ───────────────────────────────────────
    let config = SiteConfig::from_env()?;
    let app: SharedApp = Arc::new(App::new(config, HttpSource::new()?));

    // ─── 3) initial load in the background; pages show "Loading…" ────
    {
        let app = app.clone();
        tokio::spawn(async move {
            app.load_all().await;
        });
    }

    // ─── 4) routes ───────────────────────────────────────────────────
    let home = view_route(View::Home, warp::path::end(), app.clone());
    let drivers = view_route(View::Drivers, warp::path!("drivers"), app.clone());
    let constructors = view_route(View::Constructors, warp::path!("constructors"), app.clone());
    let races = view_route(View::Races, warp::path!("races"), app.clone());

    let refresh = refresh_route(app.clone());

    let health = warp::path!("health").and(warp::get()).and_then(health_check);

    let css = warp::path!("static" / "site.css").and(warp::get()).map(|| {
        warp::reply::with_header(STYLESHEET, "content-type", "text/css; charset=utf-8")
    });

    let routes = home
        .or(drivers)
        .or(constructors)
        .or(races)
        .or(refresh)
        .or(health)
        .or(css)
        .with(warp::trace::request());

    // ─── 5) serve ────────────────────────────────────────────────────
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    info!("Server starting on port {}", port);
    info!("Standings: http://localhost:{}/", port);

    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let result = health_check().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn refresh_redirects_home() {
        let app: SharedApp = Arc::new(App::new(SiteConfig::default(), HttpSource::new().unwrap()));
        let route = refresh_route(app.clone());

        let res = warp::test::request()
            .method("POST")
            .path("/refresh")
            .reply(&route)
            .await;
        assert_eq!(res.status(), 303);
        assert_eq!(res.headers()["location"], "/");

        let res = warp::test::request().path("/refresh").reply(&route).await;
        assert_eq!(res.status(), 405);
    }

    #[tokio::test]
    async fn missing_query_string_defaults_to_empty() {
        let q = warp::test::request()
            .path("/races")
            .filter(&page_query())
            .await
            .unwrap();
        assert!(q.race.is_none() && q.q.is_none());

        let q = warp::test::request()
            .path("/races?race=R1+%E2%80%93+Australia&q=red")
            .filter(&page_query())
            .await
            .unwrap();
        assert_eq!(q.race.as_deref(), Some("R1 – Australia"));
        assert_eq!(q.q.as_deref(), Some("red"));
    }
}
