//! Dinner Repository

use super::{RepoError, RepoResult, Tx};
use shared::models::{DEFAULT_SEATS, Dinner, DinnerCreate, DinnerStatus, DinnerWithStats};
use sqlx::SqlitePool;

const DINNER_SELECT: &str = "SELECT id, title, description, event_date, seats, status, restaurant_id, created_by, created_at, updated_at FROM dinner";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Dinner>> {
    let sql = format!("{DINNER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Dinner>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id_tx(tx: &mut Tx<'_>, id: i64) -> RepoResult<Option<Dinner>> {
    let sql = format!("{DINNER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Dinner>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// All dinners with restaurant name and seat usage, newest event first
pub async fn find_all_with_stats(pool: &SqlitePool) -> RepoResult<Vec<DinnerWithStats>> {
    let rows = sqlx::query_as::<_, DinnerWithStats>(
        "SELECT d.id, d.title, d.description, d.event_date, d.seats, d.status, d.restaurant_id, r.name AS restaurant_name, (SELECT COUNT(*) FROM dinner_assignment da WHERE da.dinner_id = d.id) AS assigned_count, d.created_at FROM dinner d LEFT JOIN restaurant r ON d.restaurant_id = r.id ORDER BY d.event_date DESC, d.id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a draft dinner and return its id
pub async fn create(
    pool: &SqlitePool,
    data: DinnerCreate,
    created_by: Option<i64>,
) -> RepoResult<i64> {
    let seats = data.seats.unwrap_or(DEFAULT_SEATS);
    if seats < 1 {
        return Err(RepoError::Validation("seats must be at least 1".into()));
    }
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    sqlx::query(
        "INSERT INTO dinner (id, title, description, event_date, seats, status, restaurant_id, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(data.title.trim())
    .bind(data.description.unwrap_or_default())
    .bind(data.event_date)
    .bind(seats)
    .bind(DinnerStatus::Draft)
    .bind(data.restaurant_id)
    .bind(created_by)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Take the database write lock by touching the dinner row.
///
/// Must be the first statement of a seating transaction; every later read in
/// that transaction sees a state no other writer can change before commit.
/// Returns `false` when the dinner does not exist.
pub async fn lock_tx(tx: &mut Tx<'_>, id: i64, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE dinner SET updated_at = ?1 WHERE id = ?2")
        .bind(now)
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(rows.rows_affected() == 1)
}

/// [`lock_tx`] for the dinner owning a waitlist entry; `false` if the entry is unknown
pub async fn lock_for_entry_tx(tx: &mut Tx<'_>, entry_id: i64, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE dinner SET updated_at = ?1 WHERE id = (SELECT dinner_id FROM waitlist_entry WHERE id = ?2)",
    )
    .bind(now)
    .bind(entry_id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() == 1)
}

pub async fn count_assignments(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM dinner_assignment WHERE dinner_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_assignments_tx(tx: &mut Tx<'_>, id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM dinner_assignment WHERE dinner_id = ?")
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;
    Ok(count)
}
