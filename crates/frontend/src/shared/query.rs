//! Reactive query slots on top of the gateway.
//!
//! `QueryClient` holds the shared response cache and is provided once by `App`.
//! `use_query` binds one view region to a query built from signals: whenever the
//! query's key changes a new request is started through the given gateway
//! operation, and only the response for the latest key is committed to the
//! region's state.

use contracts::shared::analytics::query_cache::DEFAULT_CACHE_TTL_MS;
use contracts::shared::analytics::{
    AnalyticsQuery, GatewayError, QueryCache, QueryKey, QueryState, RequestSlot,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Shared cache of successful responses, stored as JSON per query key.
///
/// `generation` changes whenever the whole cache is dropped; every mounted query
/// tracks it and loads again.
#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: StoredValue<QueryCache<serde_json::Value>>,
    generation: RwSignal<u64>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: StoredValue::new(QueryCache::new(DEFAULT_CACHE_TTL_MS)),
            generation: RwSignal::new(0),
        }
    }

    fn get_fresh<Q: AnalyticsQuery>(&self, key: &QueryKey) -> Option<Q::Response> {
        let now = now_ms();
        self.cache
            .with_value(|cache| cache.get_fresh(key, now).cloned())
            .and_then(|value| serde_json::from_value(value).ok())
    }

    fn store<Q: AnalyticsQuery>(&self, key: QueryKey, response: &Q::Response) {
        let Ok(value) = serde_json::to_value(response) else {
            return;
        };
        let now = now_ms();
        self.cache.update_value(|cache| {
            cache.evict_stale(now);
            cache.insert(key, value, now);
        });
    }

    /// Drops every cached response and reloads the queries on screen.
    pub fn invalidate_all(&self) {
        self.cache.update_value(|cache| cache.clear());
        self.generation.update(|n| *n += 1);
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().unwrap_or_else(|| {
        log::warn!("QueryClient not provided, using a private cache");
        QueryClient::new()
    })
}

/// Outcome of one view region together with the query that produced it.
type Outcome<Q> = QueryState<(Q, <Q as AnalyticsQuery>::Response)>;

/// State of one view region plus a way to force a refetch.
pub struct QueryHandle<Q>
where
    Q: AnalyticsQuery + Clone + Send + Sync + 'static,
    Q::Response: Send + Sync,
{
    outcome: RwSignal<Outcome<Q>>,
    refresh: RwSignal<u64>,
    bypass_cache: StoredValue<bool>,
}

impl<Q> Clone for QueryHandle<Q>
where
    Q: AnalyticsQuery + Clone + Send + Sync + 'static,
    Q::Response: Send + Sync,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q> Copy for QueryHandle<Q>
where
    Q: AnalyticsQuery + Clone + Send + Sync + 'static,
    Q::Response: Send + Sync,
{
}

impl<Q> QueryHandle<Q>
where
    Q: AnalyticsQuery + Clone + Send + Sync + 'static,
    Q::Response: Send + Sync,
{
    /// Tracked view state.
    pub fn state(&self) -> QueryState<Q::Response> {
        self.outcome.get().map(|(_, response)| response)
    }

    /// Tracked view state paired with the query the response answers. Render
    /// labels from this query, not from the current selection, which may already
    /// point at a request still in flight.
    pub fn state_with_query(&self) -> Outcome<Q> {
        self.outcome.get()
    }

    /// Re-issue the current query, skipping the cache.
    pub fn refetch(&self) {
        self.bypass_cache.set_value(true);
        self.refresh.update(|n| *n += 1);
    }

    pub fn retry_callback(&self) -> Callback<()> {
        let handle = *self;
        Callback::new(move |_| handle.refetch())
    }
}

/// Bind a view region to the query produced by `make_query`, loaded with `fetch`.
///
/// `make_query` is tracked: any signal it reads re-runs the query. The query
/// supplies the cache key and validation; `fetch` is the gateway operation that
/// loads it. A fresh cache entry is shown without a request. Invalid queries fail
/// immediately.
pub fn use_query<Q, F, L, Fut>(make_query: F, fetch: L) -> QueryHandle<Q>
where
    Q: AnalyticsQuery + Clone + Send + Sync + 'static,
    Q::Response: Send + Sync,
    F: Fn() -> Q + 'static,
    L: Fn(Q) -> Fut + Copy + 'static,
    Fut: Future<Output = Result<Q::Response, GatewayError>> + 'static,
{
    let client = use_query_client();
    let handle = QueryHandle {
        outcome: RwSignal::new(QueryState::Idle),
        refresh: RwSignal::new(0),
        bypass_cache: StoredValue::new(false),
    };
    let slot = StoredValue::new(RequestSlot::new());

    Effect::new(move |_| {
        handle.refresh.track();
        client.generation.track();
        let query = make_query();
        let bypass = handle
            .bypass_cache
            .try_update_value(std::mem::take)
            .unwrap_or(false);
        run_query(client, query, fetch, slot, handle.outcome, bypass);
    });

    handle
}

fn run_query<Q, L, Fut>(
    client: QueryClient,
    query: Q,
    fetch: L,
    slot: StoredValue<RequestSlot>,
    outcome: RwSignal<Outcome<Q>>,
    bypass_cache: bool,
) where
    Q: AnalyticsQuery + Clone + Send + Sync + 'static,
    Q::Response: Send + Sync,
    L: Fn(Q) -> Fut,
    Fut: Future<Output = Result<Q::Response, GatewayError>> + 'static,
{
    let key = query.query_key();
    let Some(ticket) = slot.try_update_value(|s| s.begin(key.clone())) else {
        return;
    };

    if let Err(err) = query.validate() {
        log::warn!("{} not sent: {}", Q::NAME, err);
        outcome.set(QueryState::Failed(err.into()));
        return;
    }

    if !bypass_cache {
        if let Some(hit) = client.get_fresh::<Q>(&key) {
            log::debug!("cache hit {}", key);
            outcome.set(QueryState::from_result(Ok(hit)).map(|hit| (query, hit)));
            return;
        }
    }

    outcome.set(QueryState::Loading);
    let request = fetch(query.clone());
    spawn_local(async move {
        let result = request.await;
        if let Ok(response) = &result {
            client.store::<Q>(key.clone(), response);
        }
        let is_current = slot
            .try_with_value(|s| s.is_current(&ticket))
            .unwrap_or(false);
        if is_current {
            outcome.set(QueryState::from_result(result).map(|response| (query, response)));
        } else {
            log::debug!("discarding stale response for {}", key);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_all_empties_cache_and_bumps_generation() {
        let client = QueryClient::new();
        client.cache.update_value(|cache| {
            cache.insert(QueryKey::of("stores", &()), serde_json::json!([]), now_ms())
        });
        let before = client.generation.get_untracked();

        client.invalidate_all();

        assert!(client.cache.with_value(|cache| cache.is_empty()));
        assert_eq!(client.generation.get_untracked(), before + 1);
    }
}
