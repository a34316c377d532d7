use serde::{Deserialize, Serialize};

use crate::shared::analytics::endpoint::{check_limit, AnalyticsQuery, ApiCall};
use crate::shared::analytics::format::{format_value, MISSING_VALUE};
use crate::shared::analytics::ordering::cmp_value_desc;
use crate::shared::analytics::records::{rank_top_products, sort_chronologically};
use crate::shared::analytics::{
    Filter, GatewayError, GroupDimension, MetricSpec, TimeBucket, TimeSeriesPoint, TopProduct,
    TopProductOrder, ValidationError,
};

pub const DEFAULT_AGGREGATION_LIMIT: u32 = 100;
pub const MAX_AGGREGATION_LIMIT: u32 = 1_000;
pub const DEFAULT_TOP_PRODUCTS_LIMIT: u32 = 10;
pub const MAX_TOP_PRODUCTS_LIMIT: u32 = 100;

/// `POST /api/analytics/time-series`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesRequest {
    pub metric: MetricSpec,
    pub time_bucket: TimeBucket,
    pub filters: Filter,
    /// Ask the backend to include the previous period alongside.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub compare_previous: bool,
}

impl TimeSeriesRequest {
    pub fn new(metric: MetricSpec, time_bucket: TimeBucket, filters: Filter) -> Self {
        Self {
            metric,
            time_bucket,
            filters,
            compare_previous: false,
        }
    }
}

impl AnalyticsQuery for TimeSeriesRequest {
    type Response = Vec<TimeSeriesPoint>;
    const NAME: &'static str = "timeseries";

    fn validate(&self) -> Result<(), ValidationError> {
        self.filters.validate()
    }

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        ApiCall::post("/api/analytics/time-series").json(self)
    }

    fn normalize(&self, mut points: Vec<TimeSeriesPoint>) -> Vec<TimeSeriesPoint> {
        sort_chronologically(&mut points);
        points
    }
}

/// `POST /api/analytics/aggregation`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationRequest {
    pub metric: MetricSpec,
    pub group_by: Vec<GroupDimension>,
    pub filters: Filter,
    pub limit: u32,
}

impl AggregationRequest {
    pub fn new(metric: MetricSpec, group_by: Vec<GroupDimension>, filters: Filter) -> Self {
        Self {
            metric,
            group_by,
            filters,
            limit: DEFAULT_AGGREGATION_LIMIT,
        }
    }

    /// Dimension whose label heads the chart axis and first table column.
    pub fn primary_dimension(&self) -> Option<GroupDimension> {
        self.group_by.first().copied()
    }
}

impl AnalyticsQuery for AggregationRequest {
    type Response = Vec<AggregationRow>;
    const NAME: &'static str = "aggregation";

    fn validate(&self) -> Result<(), ValidationError> {
        if self.group_by.is_empty() {
            return Err(ValidationError::EmptyGroupBy);
        }
        check_limit("limit", self.limit, 1, MAX_AGGREGATION_LIMIT)?;
        self.filters.validate()
    }

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        ApiCall::post("/api/analytics/aggregation").json(self)
    }
}

/// One grouped row: `{"<dimension>_name": ..., "value": ...}`.
///
/// The row order is whatever the backend returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationRow {
    #[serde(default)]
    pub value: f64,
    #[serde(flatten)]
    pub labels: serde_json::Map<String, serde_json::Value>,
}

impl AggregationRow {
    /// Display label for `dimension`: `<dimension>_name`, falling back to the bare
    /// `<dimension>` field the backend uses for weekday and hour buckets.
    pub fn label(&self, dimension: GroupDimension) -> String {
        let raw = self
            .labels
            .get(&dimension.label_field())
            .or_else(|| self.labels.get(dimension.as_str()));
        match raw {
            Some(serde_json::Value::String(s)) => dimension.display_value(s),
            Some(serde_json::Value::Number(n)) => dimension.display_value(&n.to_string()),
            Some(serde_json::Value::Bool(b)) => b.to_string(),
            _ => MISSING_VALUE.to_string(),
        }
    }

    /// Value rendered with the metric's fallback formatter.
    pub fn formatted_value(&self, metric: MetricSpec) -> String {
        format_value(self.value, metric.display_format())
    }
}

/// Deterministic order for callers that need a fixed top-N: value descending, ties
/// by label.
pub fn sort_rows_by_value(rows: &mut [AggregationRow], dimension: GroupDimension) {
    rows.sort_by(|a, b| {
        cmp_value_desc(a.value, b.value).then_with(|| a.label(dimension).cmp(&b.label(dimension)))
    });
}

/// `POST /api/analytics/top-products`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProductsRequest {
    pub filters: Filter,
    pub limit: u32,
    pub order_by: TopProductOrder,
}

impl TopProductsRequest {
    pub fn new(filters: Filter) -> Self {
        Self {
            filters,
            limit: DEFAULT_TOP_PRODUCTS_LIMIT,
            order_by: TopProductOrder::default(),
        }
    }
}

impl AnalyticsQuery for TopProductsRequest {
    type Response = Vec<TopProduct>;
    const NAME: &'static str = "top-products";

    fn validate(&self) -> Result<(), ValidationError> {
        check_limit("limit", self.limit, 1, MAX_TOP_PRODUCTS_LIMIT)?;
        self.filters.validate()
    }

    fn build_call(&self) -> Result<ApiCall, GatewayError> {
        ApiCall::post("/api/analytics/top-products").json(self)
    }

    fn normalize(&self, rows: Vec<TopProduct>) -> Vec<TopProduct> {
        rank_top_products(rows, self.limit as usize)
    }
}
