//! Unified error system
//!
//! - [`ErrorCode`]: numeric error codes shared with the admin UI
//! - [`ErrorCategory`]: classification of codes by range
//! - [`AppError`]: error carried to the HTTP boundary
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Seating errors (dinners, assignments, waitlist)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::CapacityExceeded, "Event is at capacity (6 seats)");
//! assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
