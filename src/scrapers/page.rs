//! HTTP download of source pages.
//!
//! [`PageFetch`] is the seam between scraping logic and the network so the
//! parsers and aggregator can run against in-memory pages in tests.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Per-request timeout for source pages.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Trait for downloading the HTML of a page.
pub trait PageFetch {
    /// Fetch `url` and return the response body.
    ///
    /// Connection failures, timeouts and non-2xx statuses are errors.
    async fn fetch_page(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// [`PageFetch`] over a shared `reqwest` client with browser-like headers.
///
/// Several of the scraped sites refuse requests without a browser user agent.
#[derive(Debug, Clone)]
pub struct HttpPageFetch {
    client: reqwest::Client,
}

impl HttpPageFetch {
    /// Create a fetcher with the default [`FETCH_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Create a fetcher whose requests give up after `timeout`.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Total time allowed per request, connect through body
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(browser_headers())
            .build()?;
        Ok(Self { client })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("vi-VN,vi;q=0.9,en;q=0.8"));
    headers
}

impl PageFetch for HttpPageFetch {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let res = async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(response.text().await?)
        }
        .await;
        let dt = t0.elapsed();

        match &res {
            Ok(body) => debug!(elapsed_ms = dt.as_millis(), bytes = body.len(), "Fetched page"),
            Err(e) => warn!(elapsed_ms = dt.as_millis(), error = %e, "Page request failed"),
        }
        res.map_err(Into::into)
    }
}
