//! Request-key based caching.
//!
//! `QueryCache` keeps the last successful response per key for a freshness window.
//! `RequestSlot` tracks which key a single view region currently wants, so a
//! response that arrives after the filters changed is dropped instead of
//! overwriting newer state.

use serde::Serialize;
use std::collections::HashMap;

/// Matches the backend's own result cache.
pub const DEFAULT_CACHE_TTL_MS: u64 = 300_000;

/// `(query name, canonical JSON of the parameters)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub name: &'static str,
    pub params: String,
}

impl QueryKey {
    pub fn of<P: Serialize + ?Sized>(name: &'static str, params: &P) -> Self {
        Self {
            name,
            params: serde_json::to_string(params).unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.params)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at_ms: u64,
}

/// Last-writer-wins map from query key to response. Timestamps are supplied by the
/// caller (milliseconds, any monotonic-enough clock).
#[derive(Debug, Clone)]
pub struct QueryCache<V> {
    entries: HashMap<QueryKey, CacheEntry<V>>,
    ttl_ms: u64,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL_MS)
    }
}

impl<V> QueryCache<V> {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms,
        }
    }

    pub fn insert(&mut self, key: QueryKey, value: V, now_ms: u64) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at_ms: now_ms,
            },
        );
    }

    /// Entry for `key` if it is younger than the TTL.
    pub fn get_fresh(&self, key: &QueryKey, now_ms: u64) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| now_ms.saturating_sub(entry.stored_at_ms) < self.ttl_ms)
            .map(|entry| &entry.value)
    }

    /// Drops expired entries.
    pub fn evict_stale(&mut self, now_ms: u64) {
        let ttl = self.ttl_ms;
        self.entries
            .retain(|_, entry| now_ms.saturating_sub(entry.stored_at_ms) < ttl);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle for one in-flight request issued from a `RequestSlot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub key: QueryKey,
    generation: u64,
}

/// Tracks the request a single view region is waiting for.
#[derive(Debug, Clone, Default)]
pub struct RequestSlot {
    generation: u64,
    current: Option<QueryKey>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` as the wanted request; any earlier ticket becomes stale.
    pub fn begin(&mut self, key: QueryKey) -> RequestTicket {
        self.generation += 1;
        self.current = Some(key.clone());
        RequestTicket {
            key,
            generation: self.generation,
        }
    }

    /// True if the response for `ticket` may be committed to view state.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation && self.current.as_ref() == Some(&ticket.key)
    }

    pub fn current_key(&self) -> Option<&QueryKey> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(params: &str) -> QueryKey {
        QueryKey::of("aggregation", params)
    }

    #[test]
    fn test_key_is_canonical_json() {
        let a = QueryKey::of("stores", &serde_json::json!({"limit": 10}));
        let b = QueryKey::of("stores", &serde_json::json!({"limit": 10}));
        let c = QueryKey::of("products", &serde_json::json!({"limit": 10}));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "stores:{\"limit\":10}");
    }

    #[test]
    fn test_cache_respects_ttl() {
        let mut cache = QueryCache::new(1_000);
        cache.insert(key("a"), 1, 10_000);
        assert_eq!(cache.get_fresh(&key("a"), 10_500), Some(&1));
        assert_eq!(cache.get_fresh(&key("a"), 11_000), None);
        assert_eq!(cache.get_fresh(&key("b"), 10_500), None);

        cache.evict_stale(11_000);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_last_writer_wins() {
        let mut cache = QueryCache::default();
        cache.insert(key("a"), 1, 0);
        cache.insert(key("a"), 2, 5);
        assert_eq!(cache.get_fresh(&key("a"), 10), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_drops_fresh_entries() {
        let mut cache = QueryCache::default();
        cache.insert(QueryKey::of("stores", &()), 1, 0);
        cache.insert(QueryKey::of("insights", &()), 2, 0);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get_fresh(&QueryKey::of("insights", &()), 0).is_none());
    }

    #[test]
    fn test_superseded_ticket_is_stale() {
        let mut slot = RequestSlot::new();
        let first = slot.begin(key("january"));
        let second = slot.begin(key("february"));

        assert!(!slot.is_current(&first));
        assert!(slot.is_current(&second));
        assert_eq!(slot.current_key(), Some(&key("february")));
    }

    #[test]
    fn test_same_key_reissued_supersedes_previous_ticket() {
        let mut slot = RequestSlot::new();
        let first = slot.begin(key("a"));
        let again = slot.begin(key("a"));
        assert!(!slot.is_current(&first));
        assert!(slot.is_current(&again));
    }
}
