//! Sequential crawl over every registered source.

use super::page::PageFetch;
use super::source::fetch_source;
use crate::models::{NewsItem, SourceConfig};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument};

/// Pause between two source requests.
pub const PACING_DELAY: Duration = Duration::from_secs(1);

/// Scrape every source in registry order and concatenate the results.
///
/// Sources are fetched one at a time with `pacing` between consecutive
/// requests; this is politeness toward the scraped sites and is never
/// parallelized. A source that fails contributes nothing and the crawl moves
/// on.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn crawl_all<F: PageFetch>(
    fetch: &F,
    sources: &[SourceConfig],
    pacing: Duration,
) -> Vec<NewsItem> {
    let per_source: Vec<Vec<NewsItem>> = stream::iter(sources.iter().enumerate())
        .then(|(i, source)| async move {
            if i > 0 && !pacing.is_zero() {
                sleep(pacing).await;
            }
            fetch_source(fetch, source).await
        })
        .collect()
        .await;

    let distribution: Vec<(&str, usize)> = sources
        .iter()
        .zip(&per_source)
        .map(|(source, items)| (source.id, items.len()))
        .collect();
    let items: Vec<NewsItem> = per_source.into_iter().flatten().collect();

    info!(total = items.len(), "Crawled all sources");
    info!(distribution = ?distribution, "Items per source");
    items
}
