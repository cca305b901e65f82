//! Data models
//!
//! Shared between supper-server and the admin UI (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps Unix milliseconds.
//!
//! The admin UI speaks `event_id` / `user_id`; rows keep `dinner_id` /
//! `member_id` and rename on the wire.

pub mod analytics;
pub mod assignment;
pub mod dashboard;
pub mod dinner;
pub mod member;
pub mod restaurant;
pub mod survey;
pub mod waitlist;

// Re-exports
pub use analytics::*;
pub use assignment::*;
pub use dashboard::*;
pub use dinner::*;
pub use member::*;
pub use restaurant::*;
pub use survey::*;
pub use waitlist::*;
