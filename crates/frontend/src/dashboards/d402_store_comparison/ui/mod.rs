pub mod dashboard;

pub use dashboard::StoreComparisonDashboard;
