//! Supper Server - supper club admin service
//!
//! # Architecture
//!
//! Admin-facing HTTP JSON API over a SQLite store. The core is the seating
//! workflow: seat capacity, credit accounting and the per-dinner waitlist.
//!
//! ```text
//! supper-server/src/
//! ├── core/      # Config, state, server lifecycle
//! ├── auth/      # JWT + Argon2, admin middleware
//! ├── api/       # HTTP routes and handlers
//! ├── seating/   # capacity, assignment, waitlist (transactional)
//! ├── notify/    # waitlist notification dispatch
//! ├── db/        # SQLite pool, migrations, repositories
//! └── utils/     # logger, validation, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod seating;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging
///
/// Must run before [`Config::from_env`] so `.env` values are visible.
pub fn setup_environment() {
    let _ = dotenvy::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
