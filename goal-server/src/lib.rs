//! Goal Server - objective & challenge tracking engine
//!
//! Managers choose which raw KPIs their store tracks and who enters them,
//! define objectives and challenges against those KPIs, and the responsible
//! role reports progress. Sellers only see the goals meant for them.
//!
//! ```text
//! goal-server/src/
//! ├── core/      # configuration, state, server
//! ├── kpi/       # KPI config store
//! ├── metrics/   # derived metrics
//! ├── goals/     # definitions, progress, status, visibility
//! ├── sellers/   # seller directory
//! ├── api/       # HTTP routes and handlers
//! └── utils/     # errors, logging, time, validation
//! ```

pub mod api;
pub mod core;
pub mod goals;
pub mod kpi;
pub mod metrics;
pub mod sellers;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use goals::{GoalManager, ProgressTracker};
pub use kpi::KpiConfigStore;
pub use utils::{AppError, AppResult};

pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;

/// Start logging according to `config`
///
/// Outside production, events carry their source location.
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        config.log_dir.as_deref(),
        !config.is_production(),
    );
}
