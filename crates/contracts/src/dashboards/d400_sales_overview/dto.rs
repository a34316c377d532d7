use serde::{Deserialize, Serialize};

use crate::shared::analytics::endpoint::{AnalyticsQuery, ApiCall};
use crate::shared::analytics::format::{format_change, format_value, ChangeDirection};
use crate::shared::analytics::records::{rank_top_products, sort_chronologically};
use crate::shared::analytics::{
    Filter, GatewayError, ResultShape, TimeSeriesPoint, TopProduct, ValidationError, ValueFormat,
};

/// Rows of the overview's top products chart.
pub const OVERVIEW_TOP_PRODUCTS: usize = 10;

/// Request for the overview dashboard.
///
/// Sent as query parameters: `start_date`, `end_date` and one `store_ids[]` per
/// selected store. No store selection means all stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewQuery {
    pub filter: Filter,
}

impl AnalyticsQuery for OverviewQuery {
    type Response = DashboardData;
    const NAME: &'static str = "dashboard";

    fn validate(&self) -> Result<(), ValidationError> {
        self.filter.validate()
    }

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        let stores = self
            .filter
            .store_ids
            .iter()
            .map(|id| ("store_ids[]".to_string(), id.to_string()));
        Ok(ApiCall::post("/api/dashboard/overview")
            .params(self.filter.date_range().query_pairs())
            .params(stores))
    }

    fn normalize(&self, mut data: DashboardData) -> DashboardData {
        sort_chronologically(&mut data.time_series);
        data.top_products = rank_top_products(data.top_products, OVERVIEW_TOP_PRODUCTS);
        data.hourly_distribution.sort_by_key(|h| h.hour);
        data
    }
}

/// Headline number with optional period-over-period change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub value: f64,
    /// Percent change against the previous period of equal length.
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub change_label: Option<String>,
    #[serde(default)]
    pub format: ValueFormat,
}

impl MetricCard {
    pub fn formatted_value(&self) -> String {
        format_value(self.value, self.format)
    }

    pub fn change_direction(&self) -> Option<ChangeDirection> {
        self.change.map(ChangeDirection::of)
    }

    pub fn formatted_change(&self) -> Option<String> {
        self.change.map(format_change)
    }

    /// Icon name picked from the card title.
    pub fn icon_name(&self) -> &'static str {
        if self.title.contains("Faturamento") {
            "dollar"
        } else if self.title.contains("Vendas") {
            "cart"
        } else if self.title.contains("Ticket") {
            "receipt"
        } else {
            "trending-up"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPerformance {
    pub channel_name: String,
    pub sales_count: u64,
    pub revenue: f64,
    pub avg_ticket: f64,
    pub total_discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyDistribution {
    pub hour: u32,
    pub sales_count: u64,
    pub revenue: f64,
}

/// Combined snapshot for the default view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub metrics: Vec<MetricCard>,
    /// Daily revenue.
    pub time_series: Vec<TimeSeriesPoint>,
    pub channel_performance: Vec<ChannelPerformance>,
    pub top_products: Vec<TopProduct>,
    pub hourly_distribution: Vec<HourlyDistribution>,
}

impl ResultShape for DashboardData {
    /// No sales in the selected scope: every series is empty and every card is zero.
    fn is_empty_result(&self) -> bool {
        self.time_series.is_empty()
            && self.channel_performance.is_empty()
            && self.top_products.is_empty()
            && self.hourly_distribution.is_empty()
            && self.metrics.iter().all(|m| m.value == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::records::is_chronological;
    use crate::shared::analytics::{DateRange, HttpMethod};
    use chrono::NaiveDate;

    fn january() -> Filter {
        Filter::for_range(DateRange::between(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        ))
    }

    #[test]
    fn test_plan_without_stores_aggregates_everything() {
        let call = OverviewQuery { filter: january() }.plan().unwrap();
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.path, "/api/dashboard/overview");
        assert_eq!(
            call.query,
            vec![
                ("start_date".to_string(), "2025-01-01".to_string()),
                ("end_date".to_string(), "2025-01-31".to_string()),
            ]
        );
        assert!(call.body.is_none());
    }

    #[test]
    fn test_plan_repeats_store_ids() {
        let query = OverviewQuery {
            filter: january().with_stores([7, 2]),
        };
        let call = query.plan().unwrap();
        let stores: Vec<&str> = call
            .query
            .iter()
            .filter(|(k, _)| k == "store_ids[]")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(stores, vec!["2", "7"]);
    }

    #[test]
    fn test_inverted_range_never_plans() {
        let query = OverviewQuery {
            filter: Filter::for_range(DateRange::between(
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )),
        };
        assert!(matches!(query.plan(), Err(GatewayError::Validation(_))));
    }

    #[test]
    fn test_decode_and_normalize_response() {
        let raw = r#"{
            "metrics": [
                {"title": "Faturamento Total", "value": 15234.5, "change": 12.3, "format": "currency"},
                {"title": "Total de Vendas", "value": 320, "change": -4.0, "format": "number"},
                {"title": "Total de Descontos", "value": 512.0, "format": "currency"}
            ],
            "time_series": [
                {"period": "2025-01-02", "value": 200.0},
                {"period": "2025-01-01", "value": 100.0}
            ],
            "channel_performance": [
                {"channel_name": "iFood", "sales_count": 10, "revenue": 500.0, "avg_ticket": 50.0, "total_discount": 5.0}
            ],
            "top_products": [
                {"product_name": "Batata", "category_name": "Porções", "value": 10.0},
                {"product_name": "X-Burger", "category_name": "Lanches", "value": 90.0}
            ],
            "hourly_distribution": [
                {"hour": 20, "sales_count": 30, "revenue": 900.0},
                {"hour": 12, "sales_count": 25, "revenue": 700.0}
            ]
        }"#;
        let data: DashboardData = serde_json::from_str(raw).unwrap();
        let data = OverviewQuery::default().normalize(data);

        assert!(is_chronological(&data.time_series));
        assert_eq!(data.top_products[0].product_name, "X-Burger");
        assert_eq!(data.hourly_distribution[0].hour, 12);
        assert!(!data.is_empty_result());

        let revenue = &data.metrics[0];
        assert_eq!(revenue.formatted_value(), "R$ 15.234,50");
        assert_eq!(revenue.change_direction(), Some(ChangeDirection::Up));
        assert_eq!(revenue.formatted_change().as_deref(), Some("+12,3%"));
        assert_eq!(revenue.icon_name(), "dollar");

        let sales = &data.metrics[1];
        assert_eq!(sales.change_direction(), Some(ChangeDirection::Down));
        assert_eq!(data.metrics[2].change_direction(), None);
    }

    #[test]
    fn test_missing_format_defaults_to_number() {
        let card: MetricCard =
            serde_json::from_str(r#"{"title": "Pedidos", "value": 1500}"#).unwrap();
        assert_eq!(card.format, ValueFormat::Number);
        assert_eq!(card.formatted_value(), "1.500");
    }

    #[test]
    fn test_unknown_card_format_still_decodes() {
        let raw = r#"{
            "metrics": [{"title": "Taxa de Cancelamento", "value": 2.5, "format": "percentage"}],
            "time_series": [],
            "channel_performance": [],
            "top_products": [],
            "hourly_distribution": []
        }"#;
        let data: DashboardData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.metrics[0].format, ValueFormat::Other);
        assert_eq!(data.metrics[0].formatted_value(), "2,5");
    }

    #[test]
    fn test_zero_activity_is_empty() {
        let data = DashboardData {
            metrics: vec![MetricCard {
                title: "Faturamento Total".into(),
                value: 0.0,
                change: None,
                change_label: None,
                format: ValueFormat::Currency,
            }],
            ..DashboardData::default()
        };
        assert!(data.is_empty_result());
    }
}
