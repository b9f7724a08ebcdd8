use thiserror::Error;

use crate::utils::AppError;

/// Startup and serving failures
///
/// Request-level failures are [`AppError`]s and never reach this type.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::Config(err.message)
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
