use std::sync::Arc;

use crate::core::{Config, Result};
use crate::goals::{GoalManager, GoalRepository, MemoryGoalRepository, ProgressTracker};
use crate::kpi::KpiConfigStore;
use crate::sellers::SellerDirectory;
use crate::utils::{Clock, SystemClock};

/// Server state - shared handles to every engine component
///
/// Cheap to clone; everything mutable sits behind an `Arc`.
///
/// | Field | Type | Role |
/// |-------|------|------|
/// | config | Config | immutable settings |
/// | kpi_configs | Arc<KpiConfigStore> | tracked metrics per manager |
/// | goals | GoalManager | goal definitions |
/// | tracker | ProgressTracker | progress reports |
/// | sellers | Arc<SellerDirectory> | seller records |
/// | clock | Arc<dyn Clock> | business "today" |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub kpi_configs: Arc<KpiConfigStore>,
    pub goals: GoalManager,
    pub tracker: ProgressTracker,
    pub sellers: Arc<SellerDirectory>,
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("goals", &self.goals)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// Wire components around one goal repository and one clock
    pub fn new(config: Config, repo: Arc<dyn GoalRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            kpi_configs: Arc::new(KpiConfigStore::new()),
            goals: GoalManager::new(repo.clone(), clock.clone()),
            tracker: ProgressTracker::new(repo, clock.clone()),
            sellers: Arc::new(SellerDirectory::new()),
            clock,
        }
    }

    /// In-memory storage and the wall clock in the business timezone
    pub fn initialize(config: &Config) -> Result<Self> {
        let tz = config.timezone()?;
        tracing::info!(timezone = %tz, "Business timezone");
        Ok(Self::new(
            config.clone(),
            Arc::new(MemoryGoalRepository::new()),
            Arc::new(SystemClock::new(tz)),
        ))
    }
}
