pub mod d400_sales_overview;
pub mod d401_analytics_builder;
pub mod d402_store_comparison;
pub mod d403_insights;
