//! Shared types for goal tracking
//!
//! Domain models, the unified error system and small utilities used by
//! goal-server and by clients consuming its API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind};
