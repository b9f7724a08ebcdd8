//! Unified error codes for goal tracking
//!
//! This module defines all error codes used across goal-server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 3xxx: KPI configuration errors
//! - 4xxx: Goal errors
//! - 5xxx: Seller errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Acting role is not the goal's data entry responsible
    ProgressRoleMismatch = 2002,
    /// Acting role header missing or unreadable
    ActorRoleRequired = 2003,

    // ==================== 3xxx: KPI Config ====================
    /// No KPI configuration for this manager
    KpiConfigNotFound = 3001,
    /// Both seller and manager entry enabled for one metric
    KpiToggleConflict = 3002,
    /// Unknown raw metric id
    UnknownMetric = 3003,

    // ==================== 4xxx: Goal ====================
    /// Goal not found
    GoalNotFound = 4001,
    /// Goal is achieved or failed and accepts no more progress
    GoalClosed = 4002,
    /// Goal was modified concurrently
    GoalVersionConflict = 4003,

    // ==================== 5xxx: Seller ====================
    /// Seller not found
    SellerNotFound = 5001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::ProgressRoleMismatch => {
                "Only the data entry responsible may report progress"
            }
            ErrorCode::ActorRoleRequired => "Actor role is required",

            // KPI Config
            ErrorCode::KpiConfigNotFound => "KPI configuration not found",
            ErrorCode::KpiToggleConflict => {
                "Metric is already entered by the other role"
            }
            ErrorCode::UnknownMetric => "Unknown metric",

            // Goal
            ErrorCode::GoalNotFound => "Goal not found",
            ErrorCode::GoalClosed => "Goal is closed",
            ErrorCode::GoalVersionConflict => "Goal was modified by another request",

            // Seller
            ErrorCode::SellerNotFound => "Seller not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::ProgressRoleMismatch),
            2003 => Ok(ErrorCode::ActorRoleRequired),

            // KPI Config
            3001 => Ok(ErrorCode::KpiConfigNotFound),
            3002 => Ok(ErrorCode::KpiToggleConflict),
            3003 => Ok(ErrorCode::UnknownMetric),

            // Goal
            4001 => Ok(ErrorCode::GoalNotFound),
            4002 => Ok(ErrorCode::GoalClosed),
            4003 => Ok(ErrorCode::GoalVersionConflict),

            // Seller
            5001 => Ok(ErrorCode::SellerNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
