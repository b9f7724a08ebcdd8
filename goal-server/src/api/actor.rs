//! Acting role extractor
//!
//! The caller states who it acts as in the `X-Actor-Role` header
//! (`seller` or `manager`). Identity is established upstream.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::models::DataEntryRole;

use crate::utils::{AppError, ErrorCode};

pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorRole(pub DataEntryRole);

impl ActorRole {
    /// Manager-only operations
    pub fn require_manager(&self) -> Result<(), AppError> {
        match self.0 {
            DataEntryRole::Manager => Ok(()),
            DataEntryRole::Seller => Err(AppError::permission_denied(
                "This operation is reserved to managers",
            )),
        }
    }
}

impl<S> FromRequestParts<S> for ActorRole
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ACTOR_ROLE_HEADER) else {
            return Err(AppError::with_message(
                ErrorCode::ActorRoleRequired,
                "Missing X-Actor-Role header",
            ));
        };

        value
            .to_str()
            .ok()
            .and_then(|v| v.parse::<DataEntryRole>().ok())
            .map(ActorRole)
            .ok_or_else(|| {
                tracing::warn!(uri = %parts.uri, "Invalid X-Actor-Role header");
                AppError::with_message(
                    ErrorCode::ActorRoleRequired,
                    "X-Actor-Role must be 'seller' or 'manager'",
                )
            })
    }
}
