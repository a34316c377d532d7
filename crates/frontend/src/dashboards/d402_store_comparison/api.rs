use crate::shared::gateway::execute;
use contracts::dashboards::d402_store_comparison::{StoreComparisonQuery, StoreComparisonRow};
use contracts::shared::analytics::{Filter, GatewayError};

/// Stores of the period ranked by revenue. Only the date range of `filter` applies.
pub async fn get_store_comparison(
    filter: Filter,
    limit: u32,
) -> Result<Vec<StoreComparisonRow>, GatewayError> {
    execute(&StoreComparisonQuery::new(&filter, limit)).await
}
