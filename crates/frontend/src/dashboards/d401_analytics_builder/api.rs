use crate::shared::gateway::execute;
use contracts::dashboards::d401_analytics_builder::{
    AggregationRequest, AggregationRow, TimeSeriesRequest, TopProductsRequest,
};
use contracts::shared::analytics::{GatewayError, TimeSeriesPoint, TopProduct};

/// Points ordered by period ascending.
pub async fn get_time_series(
    request: TimeSeriesRequest,
) -> Result<Vec<TimeSeriesPoint>, GatewayError> {
    execute(&request).await
}

pub async fn get_aggregation(
    request: AggregationRequest,
) -> Result<Vec<AggregationRow>, GatewayError> {
    execute(&request).await
}

/// At most `request.limit` rows, best first.
pub async fn get_top_products(
    request: TopProductsRequest,
) -> Result<Vec<TopProduct>, GatewayError> {
    execute(&request).await
}
