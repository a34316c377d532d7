pub mod card_animated;
pub mod channel_filter;
pub mod chart;
pub mod date_range_picker;
pub mod metric_card;
pub mod page_header;
pub mod query_view;
pub mod store_filter;
