//! Data models
//!
//! Shared between goal-server and its clients (via API).
//! Goal ids are `i64` snowflakes; manager and seller ids are opaque strings
//! owned by the account service.

pub mod derived_metric;
pub mod goal;
pub mod kpi_config;
pub mod kpi_entry;
pub mod seller;

// Re-exports
pub use derived_metric::*;
pub use goal::*;
pub use kpi_config::*;
pub use kpi_entry::*;
pub use seller::*;
