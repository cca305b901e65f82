//! Analytics reports

use serde::{Deserialize, Serialize};

/// Signup cohort and the share of it still attending dinners later on.
///
/// Retention figures are percentages rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CohortRetention {
    /// `YYYY-MM`
    pub signup_month: String,
    pub total_signups: i64,
    pub retention_month_1: f64,
    pub retention_month_2: f64,
    pub retention_month_3: f64,
}

/// Hosting record of one restaurant partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RestaurantPerformance {
    pub id: i64,
    pub restaurant_name: String,
    pub dinners_hosted: i64,
    pub total_guests: i64,
    /// Mean post-dinner rating, 0 when nobody rated
    pub avg_rating: f64,
}
