pub mod d400_sales_overview;
pub mod d401_analytics_builder;
pub mod d402_store_comparison;
pub mod d403_insights;

pub use d400_sales_overview::ui::SalesOverviewDashboard;
pub use d401_analytics_builder::ui::AnalyticsBuilderDashboard;
pub use d402_store_comparison::ui::StoreComparisonDashboard;
pub use d403_insights::ui::InsightsDashboard;
