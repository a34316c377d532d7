use crate::shared::gateway::execute;
use contracts::dashboards::d403_insights::{InsightsQuery, InsightsResponse};
use contracts::shared::analytics::{DateRange, GatewayError};

pub async fn get_insights(date_range: DateRange) -> Result<InsightsResponse, GatewayError> {
    execute(&InsightsQuery { date_range }).await
}
