//! Utilities
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`logger`] - tracing setup
//! - [`validation`] - input length/shape checks for handlers

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
