//! In-memory TTL cache for the fetched scoreboard page.

use crate::error::ScoreboardError;
use crate::scoreboard::models::RawPage;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheEntry {
    page: Arc<RawPage>,
    cached_at: Instant,
}

/// Single-entry page cache.
///
/// The lock is held while a fetch is in flight, so a refresh that starts
/// during an outstanding fetch waits for it and then reuses its page. Only
/// successful fetches are stored.
pub struct PageCache {
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: Mutex::new(None) }
    }

    /// Returns the cached page if still fresh, otherwise runs `fetch` and caches its result.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<RawPage>, ScoreboardError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RawPage, ScoreboardError>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            let age = entry.cached_at.elapsed();
            if age < self.ttl {
                debug!("Cache hit (age {:?})", age);
                return Ok(Arc::clone(&entry.page));
            }
            debug!("Cache entry expired (age {:?})", age);
        }

        let page = Arc::new(fetch().await?);
        *slot = Some(CacheEntry { page: Arc::clone(&page), cached_at: Instant::now() });

        Ok(page)
    }
}
