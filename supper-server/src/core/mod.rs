//! Core - configuration, state and server lifecycle
//!
//! - [`Config`] - settings loaded from the environment
//! - [`ServerState`] - shared handler state
//! - [`Server`] - HTTP listener
//! - [`ServerError`] - startup/serve failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
