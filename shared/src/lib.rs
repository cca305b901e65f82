//! Shared types for the supper club admin service
//!
//! Data models, the unified error system and small utilities used by
//! `supper-server` and by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
