use anyhow::Result;
use raceboard::{config::SiteConfig, export::export_site, fetch::HttpSource};
use std::{env, path::PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Usage: render_site [OUT_DIR]   (default: ./site)
#[tokio::main]
async fn main() -> Result<()> {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("site"));

    let config = SiteConfig::from_env()?;
    let source = HttpSource::new()?;

    match export_site(&source, &config, &out_dir).await {
        Ok(written) => {
            info!(pages = written.len(), out_dir = %out_dir.display(), "done");
            Ok(())
        }
        Err(e) => {
            error!("export failed: {:#}", e);
            Err(e)
        }
    }
}
