use serde::{Deserialize, Serialize};

use crate::shared::analytics::endpoint::{AnalyticsQuery, ApiCall};
use crate::shared::analytics::{GatewayError, ResultShape};

/// `GET /api/health`
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthQuery;

impl AnalyticsQuery for HealthQuery {
    type Response = HealthStatus;
    const NAME: &'static str = "health";

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        Ok(ApiCall::get("/api/health"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// "connected", or the database error text.
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

impl ResultShape for HealthStatus {
    fn is_empty_result(&self) -> bool {
        false
    }
}

/// `DELETE /api/cache/clear?pattern=...`, development aid for the backend cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClearCacheCommand {
    pub pattern: String,
}

impl Default for ClearCacheCommand {
    fn default() -> Self {
        Self {
            pattern: "*".to_string(),
        }
    }
}

impl AnalyticsQuery for ClearCacheCommand {
    type Response = ClearCacheResponse;
    const NAME: &'static str = "cache-clear";

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        Ok(ApiCall::delete("/api/cache/clear").param("pattern", &self.pattern))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    pub status: String,
    pub cleared: u64,
}

impl ResultShape for ClearCacheResponse {
    fn is_empty_result(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::HttpMethod;

    #[test]
    fn test_health_decode() {
        let ok: HealthStatus =
            serde_json::from_str(r#"{"status":"ok","database":"connected"}"#).unwrap();
        assert!(ok.is_ok());
        let down: HealthStatus =
            serde_json::from_str(r#"{"status":"error","database":"timeout"}"#).unwrap();
        assert!(!down.is_ok());
        assert!(!down.is_empty_result());
    }

    #[test]
    fn test_clear_cache_plan() {
        let call = ClearCacheCommand::default().plan().unwrap();
        assert_eq!(call.method, HttpMethod::Delete);
        assert_eq!(call.describe(), "DELETE /api/cache/clear?pattern=*");

        let scoped = ClearCacheCommand {
            pattern: "dashboard:*".into(),
        };
        assert_eq!(
            scoped.plan().unwrap().query,
            vec![("pattern".to_string(), "dashboard:*".to_string())]
        );
    }
}
