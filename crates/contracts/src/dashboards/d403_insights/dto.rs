use serde::{Deserialize, Serialize};

use crate::shared::analytics::endpoint::{AnalyticsQuery, ApiCall};
use crate::shared::analytics::{DateRange, GatewayError, ResultShape, ValidationError};

/// `GET /api/analytics/insights?start_date&end_date`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightsQuery {
    pub date_range: DateRange,
}

impl AnalyticsQuery for InsightsQuery {
    type Response = InsightsResponse;
    const NAME: &'static str = "insights";

    fn validate(&self) -> Result<(), ValidationError> {
        self.date_range.validate()
    }

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        Ok(ApiCall::get("/api/analytics/insights").params(self.date_range.query_pairs()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Anomaly,
    Opportunity,
    Trend,
    Recommendation,
    #[serde(other)]
    Other,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Anomaly => "anomaly",
            InsightKind::Opportunity => "opportunity",
            InsightKind::Trend => "trend",
            InsightKind::Recommendation => "recommendation",
            InsightKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Info,
    Warning,
    Critical,
}

/// Color family an insight card is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightTone {
    Critical,
    Attention,
    Positive,
}

impl InsightTone {
    /// Critical severity wins over everything; otherwise anomalies get the attention
    /// color and the rest are positive.
    pub fn of(kind: InsightKind, severity: InsightSeverity) -> Self {
        if severity == InsightSeverity::Critical {
            InsightTone::Critical
        } else if kind == InsightKind::Anomaly {
            InsightTone::Attention
        } else {
            InsightTone::Positive
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            InsightTone::Critical => "#ef4444",
            InsightTone::Attention => "#f59e0b",
            InsightTone::Positive => "#10b981",
        }
    }

    /// Color with a light alpha, used for the type badge background.
    pub fn tint(&self) -> String {
        format!("{}15", self.color())
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            InsightTone::Critical => "alert-circle",
            _ => "lightbulb",
        }
    }
}

/// Backend-generated observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub severity: InsightSeverity,
    /// Supporting numbers; shape varies per insight.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub action: Option<String>,
}

impl Insight {
    pub fn tone(&self) -> InsightTone {
        InsightTone::of(self.kind, self.severity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    /// Backend timestamp, ISO 8601.
    pub generated_at: String,
}

impl ResultShape for InsightsResponse {
    fn is_empty_result(&self) -> bool {
        self.insights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::QueryState;
    use chrono::NaiveDate;

    const KINDS: [InsightKind; 5] = [
        InsightKind::Anomaly,
        InsightKind::Opportunity,
        InsightKind::Trend,
        InsightKind::Recommendation,
        InsightKind::Other,
    ];

    #[test]
    fn test_critical_always_red() {
        for kind in KINDS {
            let tone = InsightTone::of(kind, InsightSeverity::Critical);
            assert_eq!(tone, InsightTone::Critical);
            assert_eq!(tone.color(), "#ef4444");
            assert_eq!(tone.icon_name(), "alert-circle");
        }
    }

    #[test]
    fn test_non_critical_tones() {
        assert_eq!(
            InsightTone::of(InsightKind::Anomaly, InsightSeverity::Warning),
            InsightTone::Attention
        );
        assert_eq!(
            InsightTone::of(InsightKind::Trend, InsightSeverity::Warning),
            InsightTone::Positive
        );
        assert_eq!(
            InsightTone::of(InsightKind::Opportunity, InsightSeverity::Info).color(),
            "#10b981"
        );
        assert_eq!(InsightTone::Attention.tint(), "#f59e0b15");
    }

    #[test]
    fn test_plan() {
        let query = InsightsQuery {
            date_range: DateRange::between(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            ),
        };
        assert_eq!(
            query.plan().unwrap().describe(),
            "GET /api/analytics/insights?start_date=2025-01-01&end_date=2025-01-31"
        );
    }

    #[test]
    fn test_decode_payload() {
        let raw = r#"{
            "insights": [
                {"type": "trend", "title": "Canal de melhor performance: iFood",
                 "description": "Gerou R$ 1200.00", "severity": "info",
                 "data": {"channel_name": "iFood", "revenue": 1200.0}},
                {"type": "anomaly", "title": "Queda significativa na receita",
                 "description": "Receita caiu 18.2%", "severity": "critical",
                 "action": "Revisar operações"},
                {"type": "seasonality", "title": "?", "description": "?", "severity": "warning"}
            ],
            "generated_at": "2025-02-01T10:15:00.123456"
        }"#;
        let response: InsightsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.insights.len(), 3);
        assert_eq!(response.insights[1].tone(), InsightTone::Critical);
        assert_eq!(response.insights[2].kind, InsightKind::Other);
        assert_eq!(response.insights[2].tone(), InsightTone::Positive);
    }

    #[test]
    fn test_empty_insights_render_empty_state() {
        let response: InsightsResponse =
            serde_json::from_str(r#"{"insights": [], "generated_at": "2025-02-01T10:15:00"}"#)
                .unwrap();
        let state = QueryState::from_result(Ok(response));
        assert_eq!(state, QueryState::Empty);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let query = InsightsQuery {
            date_range: DateRange::between(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ),
        };
        assert!(matches!(query.plan(), Err(GatewayError::Validation(_))));
    }
}
