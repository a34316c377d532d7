pub mod analytics;
pub mod reference;
