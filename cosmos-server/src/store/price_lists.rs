//! Recency-ordered cache of fetched price lists.

use std::sync::Arc;

use tracing::{debug, info};

use crate::feed::PriceList;

use super::entries::{Loaded, load_entries, save_entries};
use super::error::StoreError;
use super::kv::KeyValueStore;

/// Store key for the cached price lists.
pub const PRICE_LISTS_KEY: &str = "cosmos.priceLists";

/// Configuration for the price-list cache.
#[derive(Debug, Clone)]
pub struct PriceListCacheConfig {
    /// Maximum number of price lists kept.
    pub capacity: usize,
}

impl Default for PriceListCacheConfig {
    fn default() -> Self {
        Self { capacity: 15 }
    }
}

/// Price lists kept most recent first, bounded in size, unique by id.
pub struct PriceListCache<S: ?Sized> {
    store: Arc<S>,
    capacity: usize,
}

impl<S: KeyValueStore + ?Sized> PriceListCache<S> {
    pub fn new(store: Arc<S>, config: &PriceListCacheConfig) -> Self {
        Self {
            store,
            capacity: config.capacity,
        }
    }

    /// Maximum number of price lists kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Load cached price lists, most recent first.
    pub fn load(&self) -> Result<Loaded<PriceList>, StoreError> {
        load_entries(&*self.store, PRICE_LISTS_KEY)
    }

    /// The most recently fetched price list, if any.
    pub fn active(&self) -> Result<Option<PriceList>, StoreError> {
        Ok(self.load()?.items.into_iter().next())
    }

    /// Insert a price list at the front.
    ///
    /// Any cached list with the same id is removed first, so re-inserting a
    /// known list moves it to the front without growing the cache. The
    /// oldest entries beyond capacity are dropped. Returns the new contents.
    pub fn upsert(&self, list: PriceList) -> Result<Vec<PriceList>, StoreError> {
        let mut lists = self.load()?.items;
        let before = lists.len();

        lists.retain(|l| l.id != list.id);
        let replaced = lists.len() < before;

        let id = list.id.clone();
        lists.insert(0, list);

        let evicted: Vec<String> = lists
            .iter()
            .skip(self.capacity)
            .map(|l| l.id.clone())
            .collect();
        lists.truncate(self.capacity);

        save_entries(&*self.store, PRICE_LISTS_KEY, &lists)?;

        if !evicted.is_empty() {
            info!(evicted = ?evicted, "Evicted old price lists");
        }
        debug!(
            price_list = %id,
            replaced,
            cached = lists.len(),
            "Upserted price list"
        );

        Ok(lists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn price_list(id: &str) -> PriceList {
        serde_json::from_value(json!({
            "id": id,
            "validUntil": "2030-01-01T00:00:00Z",
            "legs": []
        }))
        .unwrap()
    }

    fn cache() -> PriceListCache<MemoryStore> {
        PriceListCache::new(Arc::new(MemoryStore::new()), &PriceListCacheConfig::default())
    }

    fn ids(lists: &[PriceList]) -> Vec<&str> {
        lists.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn empty_cache_has_no_active_list() {
        let cache = cache();
        assert!(cache.active().unwrap().is_none());
        assert!(cache.load().unwrap().items.is_empty());
    }

    #[test]
    fn newest_first() {
        let cache = cache();
        cache.upsert(price_list("a")).unwrap();
        let lists = cache.upsert(price_list("b")).unwrap();

        assert_eq!(ids(&lists), vec!["b", "a"]);
        assert_eq!(cache.active().unwrap().unwrap().id, "b");
    }

    #[test]
    fn sixteen_upserts_keep_fifteen() {
        let cache = cache();
        for i in 0..16 {
            cache.upsert(price_list(&format!("pl-{i}"))).unwrap();
        }

        let lists = cache.load().unwrap().items;

        assert_eq!(lists.len(), 15);
        assert_eq!(lists[0].id, "pl-15");
        assert_eq!(lists[14].id, "pl-1");
        assert!(!lists.iter().any(|l| l.id == "pl-0"));
    }

    #[test]
    fn reupsert_moves_to_front_without_growing() {
        let cache = cache();
        for id in ["a", "b", "c"] {
            cache.upsert(price_list(id)).unwrap();
        }

        let lists = cache.upsert(price_list("a")).unwrap();

        assert_eq!(ids(&lists), vec!["a", "c", "b"]);
    }

    #[test]
    fn upsert_persists() {
        let store = Arc::new(MemoryStore::new());
        let config = PriceListCacheConfig::default();
        PriceListCache::new(store.clone(), &config)
            .upsert(price_list("a"))
            .unwrap();

        let reopened = PriceListCache::new(store, &config);
        assert_eq!(ids(&reopened.load().unwrap().items), vec!["a"]);
    }

    #[test]
    fn corrupted_store_starts_fresh() {
        let store = Arc::new(MemoryStore::new());
        store.set(PRICE_LISTS_KEY, "{broken".into()).unwrap();
        let cache = PriceListCache::new(store, &PriceListCacheConfig::default());

        let loaded = cache.load().unwrap();
        assert!(loaded.corrupted);

        let lists = cache.upsert(price_list("a")).unwrap();
        assert_eq!(ids(&lists), vec!["a"]);
        assert!(cache.load().unwrap().is_clean());
    }

    #[test]
    fn undecodable_entries_are_skipped() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                PRICE_LISTS_KEY,
                json!([
                    { "id": "good", "validUntil": "2030-01-01T00:00:00Z", "legs": [] },
                    { "id": "bad", "validUntil": "whenever" }
                ])
                .to_string(),
            )
            .unwrap();
        let cache = PriceListCache::new(store, &PriceListCacheConfig::default());

        let loaded = cache.load().unwrap();

        assert_eq!(ids(&loaded.items), vec!["good"]);
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn custom_capacity() {
        let cache = PriceListCache::new(
            Arc::new(MemoryStore::new()),
            &PriceListCacheConfig { capacity: 2 },
        );
        for id in ["a", "b", "c"] {
            cache.upsert(price_list(id)).unwrap();
        }

        assert_eq!(cache.capacity(), 2);
        assert_eq!(ids(&cache.load().unwrap().items), vec!["c", "b"]);
    }
}
