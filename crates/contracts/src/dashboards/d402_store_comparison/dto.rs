use serde::{Deserialize, Serialize};

use crate::shared::analytics::endpoint::{check_limit, AnalyticsQuery, ApiCall};
use crate::shared::analytics::ordering::cmp_value_desc;
use crate::shared::analytics::{DateRange, Filter, GatewayError, ValidationError};

pub const DEFAULT_STORE_LIMIT: u32 = 20;
pub const MAX_STORE_LIMIT: u32 = 100;

/// `POST /api/analytics/store-comparison?start_date&end_date&limit`
///
/// The endpoint is scoped by dates only; a store selection in the source filter
/// does not narrow the comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreComparisonQuery {
    pub date_range: DateRange,
    pub limit: u32,
}

impl StoreComparisonQuery {
    pub fn new(filter: &Filter, limit: u32) -> Self {
        Self {
            date_range: filter.date_range(),
            limit,
        }
    }
}

impl AnalyticsQuery for StoreComparisonQuery {
    type Response = Vec<StoreComparisonRow>;
    const NAME: &'static str = "store-comparison";

    fn validate(&self) -> Result<(), ValidationError> {
        self.date_range.validate()?;
        check_limit("limit", self.limit, 1, MAX_STORE_LIMIT)
    }

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        Ok(ApiCall::post("/api/analytics/store-comparison")
            .params(self.date_range.query_pairs())
            .param("limit", self.limit))
    }

    fn normalize(&self, rows: Vec<StoreComparisonRow>) -> Vec<StoreComparisonRow> {
        rank_by_revenue(rows, self.limit as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreComparisonRow {
    pub store_name: String,
    #[serde(default)]
    pub city: Option<String>,
    pub sales_count: u64,
    pub revenue: f64,
    pub avg_ticket: f64,
}

/// Revenue descending, ties by store name; at most `limit` rows.
pub fn rank_by_revenue(mut rows: Vec<StoreComparisonRow>, limit: usize) -> Vec<StoreComparisonRow> {
    rows.sort_by(|a, b| {
        cmp_value_desc(a.revenue, b.revenue).then_with(|| a.store_name.cmp(&b.store_name))
    });
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::HttpMethod;
    use chrono::NaiveDate;

    fn row(name: &str, revenue: f64) -> StoreComparisonRow {
        StoreComparisonRow {
            store_name: name.to_string(),
            city: Some("Recife".to_string()),
            sales_count: 10,
            revenue,
            avg_ticket: revenue / 10.0,
        }
    }

    #[test]
    fn test_plan_uses_query_parameters() {
        let filter = Filter::for_range(DateRange::between(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        ))
        .with_stores([1]);
        let call = StoreComparisonQuery::new(&filter, DEFAULT_STORE_LIMIT)
            .plan()
            .unwrap();
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(
            call.describe(),
            "POST /api/analytics/store-comparison?start_date=2025-01-01&end_date=2025-01-31&limit=20"
        );
        assert!(call.body.is_none());
    }

    #[test]
    fn test_limit_bounds() {
        let filter = Filter::default();
        assert!(StoreComparisonQuery::new(&filter, 0).plan().is_err());
        assert!(StoreComparisonQuery::new(&filter, 101).plan().is_err());
        assert!(StoreComparisonQuery::new(&filter, 100).plan().is_ok());
    }

    #[test]
    fn test_rows_ranked_by_revenue() {
        let query = StoreComparisonQuery::new(&Filter::default(), 2);
        let rows = query.normalize(vec![row("B", 10.0), row("A", 30.0), row("C", 30.0)]);
        let names: Vec<&str> = rows.iter().map(|r| r.store_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
