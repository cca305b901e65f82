//! Dashboard summary

use serde::{Deserialize, Serialize};

/// Admin dashboard figures; percentages are 0..=100
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_members: i64,
    pub active_subscribers: i64,
    pub upcoming_dinners: i64,
    pub seat_fill_rate: f64,
    pub repeat_attendance: f64,
    pub avg_credits_per_member: f64,
    pub waitlist_count: i64,
    pub upcoming_dinner_guests: i64,
    pub filled_tables: i64,
    pub seat_assignments: i64,
}
