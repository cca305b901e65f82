//! Dashboard statistics and analytics reports
//!
//! "Upcoming" means `event_date >= now`; percentages are 0..=100.

use super::RepoResult;
use shared::models::{CohortRetention, DashboardStats, RestaurantPerformance};
use sqlx::SqlitePool;

pub async fn dashboard(pool: &SqlitePool, now: i64) -> RepoResult<DashboardStats> {
    let total_members: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM member WHERE role = 'user'")
            .fetch_one(pool)
            .await?;

    let active_subscribers: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM member WHERE subscription_status = 'active'")
            .fetch_one(pool)
            .await?;

    let upcoming_dinners: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM dinner WHERE event_date >= ? AND status IN ('confirmed', 'draft')",
    )
    .bind(now)
    .fetch_one(pool)
    .await?;

    // Average fill across all dinners
    let seat_fill_rate: f64 = sqlx::query_scalar(
        "SELECT COALESCE(AVG((SELECT COUNT(*) FROM dinner_assignment da WHERE da.dinner_id = d.id) * 100.0 / d.seats), 0.0) FROM dinner d WHERE d.seats > 0",
    )
    .fetch_one(pool)
    .await?;

    // Share of seated members who were seated more than once
    let repeat_attendance: f64 = sqlx::query_scalar(
        "WITH per_member AS (SELECT member_id, COUNT(*) AS n FROM dinner_assignment GROUP BY member_id) SELECT CASE WHEN COUNT(*) > 0 THEN SUM(CASE WHEN n > 1 THEN 1 ELSE 0 END) * 100.0 / COUNT(*) ELSE 0.0 END FROM per_member",
    )
    .fetch_one(pool)
    .await?;

    let avg_credits_per_member: f64 = sqlx::query_scalar(
        "SELECT COALESCE(AVG(CAST(credit_balance AS REAL)), 0.0) FROM member WHERE role = 'user'",
    )
    .fetch_one(pool)
    .await?;

    let waitlist_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM waitlist_entry WHERE status = 'waiting'")
            .fetch_one(pool)
            .await?;

    let upcoming_dinner_guests: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM dinner_assignment da JOIN dinner d ON da.dinner_id = d.id WHERE d.event_date >= ?",
    )
    .bind(now)
    .fetch_one(pool)
    .await?;

    let filled_tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM dinner d WHERE d.event_date >= ? AND d.seats <= (SELECT COUNT(*) FROM dinner_assignment da WHERE da.dinner_id = d.id)",
    )
    .bind(now)
    .fetch_one(pool)
    .await?;

    let seat_assignments: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM dinner_assignment da JOIN dinner d ON da.dinner_id = d.id WHERE d.event_date >= ? AND d.status IN ('confirmed', 'draft')",
    )
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(DashboardStats {
        total_members,
        active_subscribers,
        upcoming_dinners,
        seat_fill_rate,
        repeat_attendance,
        avg_credits_per_member,
        waitlist_count,
        upcoming_dinner_guests,
        filled_tables,
        seat_assignments,
    })
}

/// Last twelve signup months, newest first.
///
/// A member counts as retained for month `k` when any of their seats was
/// assigned at least `k` calendar months after they signed up.
pub async fn cohort_retention(pool: &SqlitePool) -> RepoResult<Vec<CohortRetention>> {
    let rows = sqlx::query_as::<_, CohortRetention>(
        "WITH seated AS (
            SELECT m.id, strftime('%Y-%m', m.created_at / 1000, 'unixepoch') AS signup_month, m.created_at % 1000 AS ms, m.created_at / 1000 AS secs, da.assigned_at
            FROM member m LEFT JOIN dinner_assignment da ON da.member_id = m.id
            WHERE m.role = 'user'
        ), cohorts AS (
            SELECT signup_month,
                COUNT(DISTINCT id) AS total_signups,
                COUNT(DISTINCT CASE WHEN assigned_at >= CAST(strftime('%s', secs, 'unixepoch', '+1 month') AS INTEGER) * 1000 + ms THEN id END) AS retained_1,
                COUNT(DISTINCT CASE WHEN assigned_at >= CAST(strftime('%s', secs, 'unixepoch', '+2 months') AS INTEGER) * 1000 + ms THEN id END) AS retained_2,
                COUNT(DISTINCT CASE WHEN assigned_at >= CAST(strftime('%s', secs, 'unixepoch', '+3 months') AS INTEGER) * 1000 + ms THEN id END) AS retained_3
            FROM seated
            GROUP BY signup_month
            ORDER BY signup_month DESC
            LIMIT 12
        )
        SELECT signup_month, total_signups,
            CASE WHEN total_signups > 0 THEN ROUND(retained_1 * 100.0 / total_signups, 1) ELSE 0.0 END AS retention_month_1,
            CASE WHEN total_signups > 0 THEN ROUND(retained_2 * 100.0 / total_signups, 1) ELSE 0.0 END AS retention_month_2,
            CASE WHEN total_signups > 0 THEN ROUND(retained_3 * 100.0 / total_signups, 1) ELSE 0.0 END AS retention_month_3
        FROM cohorts
        ORDER BY signup_month DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Top ten restaurants by dinners hosted; restaurants that never hosted are left out
pub async fn restaurant_performance(pool: &SqlitePool) -> RepoResult<Vec<RestaurantPerformance>> {
    let rows = sqlx::query_as::<_, RestaurantPerformance>(
        "SELECT r.id, r.name AS restaurant_name,
            COUNT(d.id) AS dinners_hosted,
            COALESCE(SUM((SELECT COUNT(*) FROM dinner_assignment da WHERE da.dinner_id = d.id)), 0) AS total_guests,
            COALESCE((SELECT AVG(CAST(sr.restaurant_rating AS REAL)) FROM survey_response sr JOIN dinner rd ON sr.dinner_id = rd.id WHERE rd.restaurant_id = r.id), 0.0) AS avg_rating
        FROM restaurant r JOIN dinner d ON d.restaurant_id = r.id
        GROUP BY r.id, r.name
        ORDER BY dinners_hosted DESC, r.name
        LIMIT 10",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
