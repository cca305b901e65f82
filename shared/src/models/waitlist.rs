//! Waitlist Model

use serde::{Deserialize, Serialize};

/// Waitlist entry status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum WaitlistStatus {
    #[default]
    Waiting,
    /// Told a seat is free; holds that seat until converted or withdrawn
    Notified,
    Converted,
}

/// Waitlist entry for a member or a guest
///
/// `position` is 1-based and dense per dinner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WaitlistEntry {
    pub id: i64,
    #[serde(rename = "event_id")]
    pub dinner_id: i64,
    #[serde(rename = "user_id")]
    pub member_id: Option<i64>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub position: i64,
    pub status: WaitlistStatus,
    pub joined_at: i64,
    pub notified_at: Option<i64>,
}

/// `POST /api/admin/waitlist` body: either `user_id` or a guest email
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitlistJoin {
    pub event_id: Option<i64>,
    pub user_id: Option<i64>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
}
