use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use masthead_core::Feed;
use tokio::sync::{Mutex, RwLock};

/// A cached feed plus the moment it was last (re)started. Each entry has its
/// own lock, so at most one load runs per feed while other sections proceed
/// independently.
pub struct FeedEntry {
    pub feed: Feed,
    refreshed_at: Instant,
}

impl FeedEntry {
    fn new(feed: Feed) -> Self {
        Self {
            feed,
            refreshed_at: Instant::now(),
        }
    }

    /// Restart the feed from page 1 once the entry outlives the TTL, so
    /// served pages track upstream edits without refetching per request.
    pub fn ensure_fresh(&mut self, ttl: Duration) {
        if self.refreshed_at.elapsed() >= ttl {
            self.feed.reset();
            self.refreshed_at = Instant::now();
        }
    }
}

/// Per-section feed instances behind a short TTL. The section set is small
/// and fixed, so entries are never evicted, only reset.
pub struct FeedCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, Arc<Mutex<FeedEntry>>>>,
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetch the entry for a section, creating it on first use.
    pub async fn entry(
        &self,
        slug: &str,
        category_id: u32,
        per_page: u32,
    ) -> Arc<Mutex<FeedEntry>> {
        if let Some(entry) = self.entries.read().await.get(slug) {
            return entry.clone();
        }

        let mut entries = self.entries.write().await;
        entries
            .entry(slug.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(FeedEntry::new(Feed::new(category_id, per_page)))))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_section_shares_one_entry() {
        let cache = FeedCache::new(Duration::from_secs(60));
        let a = cache.entry("culture", 17, 12).await;
        let b = cache.entry("culture", 17, 12).await;
        assert!(Arc::ptr_eq(&a, &b));

        let c = cache.entry("tech", 4, 12).await;
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[tokio::test]
    async fn zero_ttl_resets_on_touch() {
        let cache = FeedCache::new(Duration::ZERO);
        let entry = cache.entry("culture", 17, 12).await;
        let mut guard = entry.lock().await;
        guard.ensure_fresh(cache.ttl());
        assert_eq!(guard.feed.page(), 0);
        assert!(guard.feed.has_more());
    }
}
