//! Utilities - shared error types, logging, time and validation helpers
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`Clock`] - source of the business "today"
//! - logging setup

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{
    ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, ErrorKind, FieldViolation,
};
pub use time::{Clock, FixedClock, SystemClock};
