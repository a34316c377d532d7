//! Executes request plans against the analytics backend.
//!
//! Every call goes through [`execute`]: the query is validated and planned in
//! `contracts`, sent with `gloo-net`, decoded and normalized. Nothing is retried and
//! nothing is cached here; see `shared::query` for the keyed cache.

use crate::shared::api_utils::api_url;
use contracts::shared::analytics::{AnalyticsQuery, ApiCall, GatewayError, HttpMethod};
use contracts::shared::reference::{
    CategoriesQuery, Category, Channel, ChannelsQuery, Product, ProductsQuery, Store,
    StoresQuery,
};
use contracts::system::backend::{
    ClearCacheCommand, ClearCacheResponse, HealthQuery, HealthStatus,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// Validate, send, decode and normalize one typed query.
pub async fn execute<Q: AnalyticsQuery>(query: &Q) -> Result<Q::Response, GatewayError> {
    let call = query.plan().map_err(|err| {
        log::warn!("{} rejected before sending: {}", Q::NAME, err);
        err
    })?;

    match send::<Q::Response>(&call).await {
        Ok(response) => Ok(query.normalize(response)),
        Err(err) => {
            log::error!("{} failed: {}", call.describe(), err);
            Err(err)
        }
    }
}

async fn send<T: DeserializeOwned>(call: &ApiCall) -> Result<T, GatewayError> {
    log::debug!("-> {}", call.describe());

    let url = api_url(call.path);
    let builder = match call.method {
        HttpMethod::Get => Request::get(&url),
        HttpMethod::Post => Request::post(&url),
        HttpMethod::Delete => Request::delete(&url),
    }
    .query(call.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let request = match &call.body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| GatewayError::Encode(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| GatewayError::Network(e.to_string()))?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::from_status(
            response.status(),
            &response.status_text(),
            &body,
        ));
    }

    let text = response
        .text()
        .await
        .map_err(|e| GatewayError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Active stores.
pub async fn list_stores() -> Result<Vec<Store>, GatewayError> {
    execute(&StoresQuery).await
}

pub async fn list_channels() -> Result<Vec<Channel>, GatewayError> {
    execute(&ChannelsQuery).await
}

pub async fn list_categories() -> Result<Vec<Category>, GatewayError> {
    execute(&CategoriesQuery).await
}

pub async fn list_products(limit: u32) -> Result<Vec<Product>, GatewayError> {
    execute(&ProductsQuery { limit }).await
}

pub async fn check_health() -> Result<HealthStatus, GatewayError> {
    execute(&HealthQuery).await
}

/// Drops backend cache entries matching `pattern` (`*` for everything).
pub async fn clear_server_cache(pattern: &str) -> Result<ClearCacheResponse, GatewayError> {
    execute(&ClearCacheCommand {
        pattern: pattern.to_string(),
    })
    .await
}
