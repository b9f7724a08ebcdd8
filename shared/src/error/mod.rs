//! Unified error system for goal tracking
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`ErrorKind`]: Caller-facing kind (validation, conflict, authorization, not found)
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 3xxx: KPI configuration errors
//! - 4xxx: Goal errors
//! - 5xxx: Seller errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorKind, FieldViolation};
//!
//! let err = AppError::goal_not_found(42);
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//!
//! let err = AppError::validation_fields(vec![
//!     FieldViolation::new("title", "must not be empty"),
//! ]);
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::{ErrorCategory, ErrorKind};
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, FieldViolation};
