//! Core - configuration, state and server
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared component handles
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
