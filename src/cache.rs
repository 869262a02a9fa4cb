//! In-memory cache of the most recent scrape.
//!
//! The cache has no timer of its own: callers ask [`NewsCache::is_stale`] and
//! replace the contents with [`NewsCache::refresh`] when it says so.

use crate::models::NewsItem;
use chrono::{DateTime, Local, TimeDelta};
use tracing::{debug, info};

/// Age after which cached results are refreshed.
pub const CACHE_TTL: TimeDelta = TimeDelta::seconds(86_400);

/// Items from the last crawl and when it happened.
#[derive(Debug, Default)]
pub struct NewsCache {
    items: Vec<NewsItem>,
    last_refresh: Option<DateTime<Local>>,
}

impl NewsCache {
    /// Create an empty cache. It reports stale until the first refresh.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the cache was never refreshed or is older than [`CACHE_TTL`].
    ///
    /// Compared in whole seconds.
    pub fn is_stale(&self, now: DateTime<Local>) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => (now - last).num_seconds() > CACHE_TTL.num_seconds(),
        }
    }

    /// Replace the cached items and stamp the refresh time.
    pub fn refresh(&mut self, items: Vec<NewsItem>, now: DateTime<Local>) {
        info!(count = items.len(), refreshed_at = %now, "Cache refreshed");
        if let Some(oldest) = items.iter().map(|item| item.fetched_at).min() {
            debug!(%oldest, "Oldest cached item");
        }
        self.items = items;
        self.last_refresh = Some(now);
    }

    /// Cached items with the time of the last refresh.
    ///
    /// # Returns
    ///
    /// The items in crawl order, and `None` for the time if the cache was
    /// never refreshed.
    pub fn get(&self) -> (&[NewsItem], Option<DateTime<Local>>) {
        (&self.items, self.last_refresh)
    }
}
