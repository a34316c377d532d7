//! Typed contract of the analytics backend: requests, responses, validation and the
//! display rules every dashboard shares. Free of any browser dependency.

pub mod dashboards;
pub mod shared;
pub mod system;
