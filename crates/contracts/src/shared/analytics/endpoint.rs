//! Request plans: everything the HTTP layer needs to issue a call, built from a typed
//! query after validation. The frontend only executes plans, it never assembles
//! paths, query strings or bodies itself.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{GatewayError, ResultShape, ValidationError};
use super::query_cache::QueryKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: HttpMethod,
    pub path: &'static str,
    /// Query parameters in send order. Repeated keys are allowed (`store_ids[]`).
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiCall {
    pub fn new(method: HttpMethod, path: &'static str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: &'static str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: &'static str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: &'static str) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn params<I: IntoIterator<Item = (String, String)>>(mut self, pairs: I) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, GatewayError> {
        let value =
            serde_json::to_value(body).map_err(|e| GatewayError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// `POST /api/analytics/store-comparison?limit=20`, for logs.
    pub fn describe(&self) -> String {
        if self.query.is_empty() {
            return format!("{} {}", self.method.as_str(), self.path);
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{} {}?{}", self.method.as_str(), self.path, query)
    }
}

/// A typed backend query.
///
/// `plan` always validates before building, so an invalid query never produces a
/// request.
pub trait AnalyticsQuery: Serialize {
    type Response: DeserializeOwned + Serialize + ResultShape + Clone + 'static;

    /// Cache namespace, e.g. `"aggregation"`.
    const NAME: &'static str;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn build_call(&self) -> Result<ApiCall, GatewayError>;

    /// Client-side guarantees applied to a decoded response (ordering, row caps).
    fn normalize(&self, response: Self::Response) -> Self::Response {
        response
    }

    fn plan(&self) -> Result<ApiCall, GatewayError> {
        self.validate()?;
        self.build_call()
    }

    fn query_key(&self) -> QueryKey {
        QueryKey::of(Self::NAME, self)
    }
}

/// Inclusive bound check shared by every `limit` parameter.
pub fn check_limit(field: &str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::LimitOutOfRange {
            field: field.to_string(),
            min,
            max,
            got: value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let call = ApiCall::post("/api/analytics/store-comparison")
            .param("start_date", "2025-01-01")
            .param("limit", 20);
        assert_eq!(
            call.describe(),
            "POST /api/analytics/store-comparison?start_date=2025-01-01&limit=20"
        );
        assert_eq!(ApiCall::get("/api/stores").describe(), "GET /api/stores");
    }

    #[test]
    fn test_check_limit() {
        assert!(check_limit("limit", 1, 1, 100).is_ok());
        assert!(check_limit("limit", 100, 1, 100).is_ok());
        assert_eq!(
            check_limit("limit", 0, 1, 100),
            Err(ValidationError::LimitOutOfRange {
                field: "limit".into(),
                min: 1,
                max: 100,
                got: 0
            })
        );
    }
}
