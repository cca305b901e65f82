//! Dinner Model

use serde::{Deserialize, Serialize};

/// Dinner lifecycle status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum DinnerStatus {
    #[default]
    Draft,
    Confirmed,
    Closed,
    Completed,
}

/// Default seat count for a new dinner
pub const DEFAULT_SEATS: i64 = 6;

/// Dinner entity; `seats` is the capacity ceiling for assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dinner {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub event_date: i64,
    pub seats: i64,
    pub status: DinnerStatus,
    pub restaurant_id: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Dinner with restaurant name and seat usage (list view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DinnerWithStats {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub event_date: i64,
    pub seats: i64,
    pub status: DinnerStatus,
    pub restaurant_id: Option<i64>,
    pub restaurant_name: Option<String>,
    pub assigned_count: i64,
    pub created_at: i64,
}

/// Create dinner payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DinnerCreate {
    pub title: String,
    pub description: Option<String>,
    pub event_date: i64,
    pub restaurant_id: Option<i64>,
    pub seats: Option<i64>,
}

/// Seat usage for one dinner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    #[serde(rename = "event_id")]
    pub dinner_id: i64,
    pub seats: i64,
    pub current_assignments: i64,
    pub available_spots: i64,
    pub has_capacity: bool,
}

impl Capacity {
    pub fn new(dinner_id: i64, seats: i64, current_assignments: i64) -> Self {
        let available_spots = (seats - current_assignments).max(0);
        Self {
            dinner_id,
            seats,
            current_assignments,
            available_spots,
            has_capacity: available_spots > 0,
        }
    }
}
