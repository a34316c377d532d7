use crate::shared::gateway::execute;
use contracts::dashboards::d400_sales_overview::{DashboardData, OverviewQuery};
use contracts::shared::analytics::{Filter, GatewayError};

/// Overview snapshot for `filter`; no store selection aggregates every store.
pub async fn get_dashboard_overview(filter: Filter) -> Result<DashboardData, GatewayError> {
    execute(&OverviewQuery { filter }).await
}
