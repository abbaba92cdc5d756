// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::{header, Client};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::is_unconfigured;
use crate::table::{records_from_text, Record};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Somewhere raw sheet text can be read from.
pub trait TextSource: Send + Sync {
    /// Body of `url`; non-success responses are errors.
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Published-sheet fetcher over HTTPS.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("raceboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl TextSource for HttpSource {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String>> + Send {
        let client = self.client.clone();
        let url = url.to_string();
        async move {
            debug!("Fetching text from {}", url);
            client
                .get(&url)
                // sheets are republished in place; never serve a cached copy
                .header(header::CACHE_CONTROL, "no-cache")
                .send()
                .await
                .with_context(|| format!("GET {} failed", url))?
                .error_for_status()
                .with_context(|| format!("Failed to load CSV from {}", url))?
                .text()
                .await
                .with_context(|| format!("Reading text from {}", url))
        }
    }
}

/// Fetch one sheet and map it to records. An unset or placeholder URL yields
/// no records without touching the network.
#[instrument(level = "info", skip(source))]
pub async fn fetch_records<S: TextSource>(source: &S, url: Option<&str>) -> Result<Vec<Record>> {
    let url = match url {
        Some(u) if !is_unconfigured(Some(u)) => u.trim(),
        _ => {
            debug!("source not configured; returning empty set");
            return Ok(Vec::new());
        }
    };

    let text = source.fetch_text(url).await?;
    let records = records_from_text(&text);
    info!(bytes = text.len(), records = records.len(), "parsed sheet");
    Ok(records)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::anyhow;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory source keyed by URL; unknown URLs fail like a 404.
    #[derive(Default)]
    pub struct MemorySource {
        pages: Mutex<HashMap<String, String>>,
        hits: AtomicUsize,
    }

    impl MemorySource {
        pub fn with(pages: &[(&str, &str)]) -> Self {
            let src = Self::default();
            for (url, body) in pages {
                src.set(url, body);
            }
            src
        }

        pub fn set(&self, url: &str, body: &str) {
            self.pages
                .lock()
                .unwrap()
                .insert(url.to_string(), body.to_string());
        }

        pub fn remove(&self, url: &str) {
            self.pages.lock().unwrap().remove(url);
        }

        pub fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    impl TextSource for MemorySource {
        fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String>> + Send {
            self.hits.fetch_add(1, Ordering::SeqCst);
            let body = self.pages.lock().unwrap().get(url).cloned();
            let url = url.to_string();
            async move { body.ok_or_else(|| anyhow!("Failed to load CSV: 404 ({})", url)) }
        }
    }
}
