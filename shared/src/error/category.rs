//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 2xxx: Permission errors
/// - 3xxx: KPI configuration errors
/// - 4xxx: Goal errors
/// - 5xxx: Seller errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Permission errors (2xxx)
    Permission,
    /// KPI configuration errors (3xxx)
    KpiConfig,
    /// Goal errors (4xxx)
    Goal,
    /// Seller errors (5xxx)
    Seller,
    /// System errors (9xxx, and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            2000..3000 => Self::Permission,
            3000..4000 => Self::KpiConfig,
            4000..5000 => Self::Goal,
            5000..6000 => Self::Seller,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Permission => "permission",
            Self::KpiConfig => "kpi_config",
            Self::Goal => "goal",
            Self::Seller => "seller",
            Self::System => "system",
        }
    }
}

/// Caller-facing failure kind
///
/// Cuts across categories: a goal error may be a conflict, a KPI error may be a
/// missing record. Callers decide how to react from the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed, missing or out-of-range input
    Validation,
    /// Write rejected by the current state of the record
    Conflict,
    /// Actor is not allowed to perform the operation
    Authorization,
    /// Target record does not exist
    NotFound,
    /// Anything the caller cannot fix
    Internal,
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the caller-facing kind for this error code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::UnknownMetric
            | Self::ActorRoleRequired => ErrorKind::Validation,

            Self::AlreadyExists
            | Self::KpiToggleConflict
            | Self::GoalClosed
            | Self::GoalVersionConflict => ErrorKind::Conflict,

            Self::PermissionDenied | Self::ProgressRoleMismatch => ErrorKind::Authorization,

            Self::NotFound
            | Self::KpiConfigNotFound
            | Self::GoalNotFound
            | Self::SellerNotFound => ErrorKind::NotFound,

            Self::Success
            | Self::Unknown
            | Self::InternalError
            | Self::StorageError
            | Self::TimeoutError
            | Self::ConfigError => ErrorKind::Internal,
        }
    }
}
