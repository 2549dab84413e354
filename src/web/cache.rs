use crate::core::resolver::normalize_slug;
use crate::core::Row;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CachedLookup {
    row: Option<Row>,
    stored_at: Instant,
}

/// Resolved slug lookups, kept for one revalidation window. A found row and a
/// confirmed miss are both cached; fetch errors never are.
#[derive(Debug)]
pub struct PageCache {
    revalidate_after: Duration,
    entries: RwLock<HashMap<String, CachedLookup>>,
}

impl PageCache {
    pub fn new(revalidate_after: Duration) -> Self {
        Self {
            revalidate_after,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.revalidate_after.is_zero()
    }

    pub fn revalidate_after(&self) -> Duration {
        self.revalidate_after
    }

    /// `Some(lookup)` while the entry is fresh, `None` once it must be refetched.
    pub async fn get(&self, slug: &str) -> Option<Option<Row>> {
        self.get_at(slug, Instant::now()).await
    }

    async fn get_at(&self, slug: &str, now: Instant) -> Option<Option<Row>> {
        if !self.is_enabled() {
            return None;
        }

        let entries = self.entries.read().await;
        entries
            .get(&normalize_slug(slug))
            .filter(|entry| now.duration_since(entry.stored_at) < self.revalidate_after)
            .map(|entry| entry.row.clone())
    }

    pub async fn insert(&self, slug: &str, row: Option<Row>) {
        self.insert_at(slug, row, Instant::now()).await;
    }

    /// Expired entries are dropped on every insert, so the map never holds
    /// more than one window's worth of distinct slugs.
    async fn insert_at(&self, slug: &str, row: Option<Row>, now: Instant) {
        if !self.is_enabled() {
            return;
        }

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| now.duration_since(entry.stored_at) < self.revalidate_after);
        entries.insert(
            normalize_slug(slug),
            CachedLookup {
                row,
                stored_at: now,
            },
        );
    }

    /// Seeds the cache from a full sheet read. The first row wins when two
    /// rows share a slug, matching lookup order. Returns the number of pages.
    pub async fn warm(&self, rows: Vec<Row>) -> usize {
        if !self.is_enabled() {
            return 0;
        }

        let stored_at = Instant::now();
        let mut entries = self.entries.write().await;
        let mut seen = HashSet::new();

        for row in rows {
            let key = normalize_slug(row.slug());
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            entries.insert(
                key,
                CachedLookup {
                    row: Some(row),
                    stored_at,
                },
            );
        }

        seen.len()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(slug: &str, city: &str) -> Row {
        [("slug", slug), ("city", city)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_entries_expire_after_the_window() {
        let cache = PageCache::new(Duration::from_secs(300));
        cache.insert("Le-Grand-Hotel", Some(row("le-grand-hotel", "Paris"))).await;

        let now = Instant::now();
        assert!(cache.get_at("le-grand-hotel", now).await.is_some());
        assert!(cache
            .get_at(" LE-GRAND-HOTEL ", now + Duration::from_secs(299))
            .await
            .is_some());
        assert!(cache
            .get_at("le-grand-hotel", now + Duration::from_secs(301))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_misses_are_cached_too() {
        let cache = PageCache::new(Duration::from_secs(300));
        cache.insert("nowhere", None).await;
        assert_eq!(cache.get("nowhere").await, Some(None));
    }

    #[tokio::test]
    async fn test_zero_window_disables_caching() {
        let cache = PageCache::new(Duration::ZERO);
        cache.insert("a", Some(row("a", "Paris"))).await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.warm(vec![row("b", "Madrid")]).await, 0);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_warm_keeps_first_row_per_slug() {
        let cache = PageCache::new(Duration::from_secs(60));
        let warmed = cache
            .warm(vec![
                row("dup", "Paris"),
                row("DUP ", "Madrid"),
                row("", "Nowhere"),
                row("other", "Lisbon"),
            ])
            .await;

        assert_eq!(warmed, 2);
        let hit = cache.get("dup").await.flatten().unwrap();
        assert_eq!(hit.field("city"), "Paris");
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_expired_entries_are_evicted_on_insert() {
        let cache = PageCache::new(Duration::from_secs(1));
        let start = Instant::now();

        for i in 0..10_000 {
            cache.insert_at(&format!("missing-{i}"), None, start).await;
        }
        assert_eq!(cache.len().await, 10_000);

        let later = start + Duration::from_secs(2);
        cache.insert_at("le-grand-hotel", Some(row("le-grand-hotel", "Paris")), later).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get_at("le-grand-hotel", later).await.is_some());
    }

    #[tokio::test]
    async fn test_fresh_entries_survive_eviction() {
        let cache = PageCache::new(Duration::from_secs(10));
        let start = Instant::now();

        cache.insert_at("old", None, start).await;
        cache.insert_at("recent", None, start + Duration::from_secs(8)).await;
        cache.insert_at("new", None, start + Duration::from_secs(12)).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get_at("recent", start + Duration::from_secs(12)).await.is_some());
        assert!(cache.get_at("old", start + Duration::from_secs(12)).await.is_none());
    }
}
