//! Goals - objectives and challenges
//!
//! - [`GoalManager`] - definitions (create, edit, delete, list)
//! - [`ProgressTracker`] - progress reports and closing
//! - [`visibility`] - per-seller filtering

mod manager;
mod repository;
pub mod status;
mod tracker;
mod validate;
pub mod visibility;

pub use manager::GoalManager;
pub use repository::{GoalRepository, MemoryGoalRepository};
pub use tracker::{ProgressTracker, progress_from_entries};
pub use validate::{ValidatedGoal, validate_goal_input};
pub use visibility::{visible_goals_for, visible_goals_for_seller};
