//! Query/response contract between the dashboards and the analytics backend.

pub mod endpoint;
pub mod error;
pub mod filter;
pub mod format;
pub mod metric;
pub mod ordering;
pub mod query_cache;
pub mod records;

pub use endpoint::{AnalyticsQuery, ApiCall, HttpMethod};
pub use error::{GatewayError, QueryState, ResultShape, ValidationError};
pub use filter::{DateRange, Filter};
pub use format::{format_value, ChangeDirection, DisplayLocale, ValueFormat};
pub use metric::{GroupDimension, MetricSpec, TimeBucket, TopProductOrder};
pub use query_cache::{QueryCache, QueryKey, RequestSlot, RequestTicket};
pub use records::{TimeSeriesPoint, TopProduct};
