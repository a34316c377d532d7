use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request that must not leave the client.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("{field} must be between {min} and {max}, got {got}")]
    LimitOutOfRange {
        field: String,
        min: u32,
        max: u32,
        got: u32,
    },

    #[error("at least one group-by dimension is required")]
    EmptyGroupBy,
}

/// Failure of a gateway call. Passed through to the view unchanged.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Backend unreachable or the request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("backend error {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("failed to serialize request: {0}")]
    Encode(String),
}

impl GatewayError {
    /// Non-success response. Uses the backend's `{"detail": ...}` body when present,
    /// the status text otherwise.
    pub fn from_status(status: u16, status_text: &str, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| match v.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) if !other.is_null() => Some(other.to_string()),
                _ => None,
            });
        GatewayError::Backend {
            status,
            message: detail.unwrap_or_else(|| status_text.to_string()),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GatewayError::Validation(_))
    }

    /// Network and backend failures; the retry button is only offered for these.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GatewayError::Network(_) | GatewayError::Backend { .. }
        )
    }
}

/// Anything whose zero-row form renders as an empty state rather than data.
pub trait ResultShape {
    fn is_empty_result(&self) -> bool;
}

impl<T> ResultShape for Vec<T> {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

/// View state of one query slot. Loading, failure and empty success stay distinct.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState<T> {
    #[default]
    Idle,
    Loading,
    Failed(GatewayError),
    Empty,
    Ready(T),
}

impl<T: ResultShape> QueryState<T> {
    pub fn from_result(result: Result<T, GatewayError>) -> Self {
        match result {
            Ok(value) if value.is_empty_result() => QueryState::Empty,
            Ok(value) => QueryState::Ready(value),
            Err(err) => QueryState::Failed(err),
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn error(&self) -> Option<&GatewayError> {
        match self {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> QueryState<U> {
        match self {
            QueryState::Idle => QueryState::Idle,
            QueryState::Loading => QueryState::Loading,
            QueryState::Failed(err) => QueryState::Failed(err),
            QueryState::Empty => QueryState::Empty,
            QueryState::Ready(value) => QueryState::Ready(f(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_not_conflated() {
        let empty: QueryState<Vec<u8>> = QueryState::from_result(Ok(vec![]));
        let ready: QueryState<Vec<u8>> = QueryState::from_result(Ok(vec![1]));
        let failed: QueryState<Vec<u8>> =
            QueryState::from_result(Err(GatewayError::Network("offline".into())));

        assert_eq!(empty, QueryState::Empty);
        assert_eq!(ready.data(), Some(&vec![1]));
        assert!(failed.error().is_some());
        assert!(empty.error().is_none());
        assert!(!empty.is_loading());
    }

    #[test]
    fn test_map_pairs_ready_value_and_keeps_other_states() {
        let ready = QueryState::Ready(vec![1, 2]).map(|rows| ("aggregation", rows.len()));
        assert_eq!(ready, QueryState::Ready(("aggregation", 2)));

        let empty: QueryState<Vec<u8>> = QueryState::Empty;
        assert_eq!(empty.map(|rows| rows.len()), QueryState::Empty);

        let failed: QueryState<Vec<u8>> = QueryState::Failed(GatewayError::Decode("eof".into()));
        assert!(failed.map(|rows| rows.len()).error().is_some());
    }

    #[test]
    fn test_validation_converts_into_gateway_error() {
        let err: GatewayError = ValidationError::EmptyGroupBy.into();
        assert!(err.is_validation());
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "invalid request: at least one group-by dimension is required"
        );
    }

    #[test]
    fn test_backend_error_display() {
        let err = GatewayError::Backend {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "backend error 503: Service Unavailable");
    }

    #[test]
    fn test_from_status_prefers_detail() {
        let err = GatewayError::from_status(500, "Internal Server Error", r#"{"detail":"boom"}"#);
        assert_eq!(
            err,
            GatewayError::Backend {
                status: 500,
                message: "boom".into()
            }
        );
        let plain = GatewayError::from_status(502, "Bad Gateway", "<html>");
        assert_eq!(plain.to_string(), "backend error 502: Bad Gateway");
    }
}
