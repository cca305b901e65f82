//! Waitlist Repository
//!
//! Positions are 1-based and kept dense per dinner by the callers in
//! `seating::waitlist`; everything that moves positions runs inside a
//! dinner-locked transaction.

use super::{RepoResult, Tx};
use shared::models::{WaitlistEntry, WaitlistStatus};
use sqlx::SqlitePool;

const ENTRY_COLUMNS: &str =
    "id, dinner_id, member_id, guest_name, guest_email, position, status, joined_at, notified_at";

/// Entries of one dinner by position; member-backed entries carry the
/// member's name and email in the guest fields
pub async fn find_by_dinner(pool: &SqlitePool, dinner_id: i64) -> RepoResult<Vec<WaitlistEntry>> {
    let rows = sqlx::query_as::<_, WaitlistEntry>(
        "SELECT w.id, w.dinner_id, w.member_id, COALESCE(w.guest_name, m.name) AS guest_name, COALESCE(w.guest_email, m.email) AS guest_email, w.position, w.status, w.joined_at, w.notified_at FROM waitlist_entry w LEFT JOIN member m ON w.member_id = m.id WHERE w.dinner_id = ? ORDER BY w.position",
    )
    .bind(dinner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<WaitlistEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM waitlist_entry WHERE id = ?");
    let row = sqlx::query_as::<_, WaitlistEntry>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id_tx(tx: &mut Tx<'_>, id: i64) -> RepoResult<Option<WaitlistEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM waitlist_entry WHERE id = ?");
    let row = sqlx::query_as::<_, WaitlistEntry>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// Positions of one dinner in order (for density checks)
pub async fn positions(pool: &SqlitePool, dinner_id: i64) -> RepoResult<Vec<i64>> {
    let rows = sqlx::query_scalar(
        "SELECT position FROM waitlist_entry WHERE dinner_id = ? ORDER BY position",
    )
    .bind(dinner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn next_position_tx(tx: &mut Tx<'_>, dinner_id: i64) -> RepoResult<i64> {
    let next = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position), 0) + 1 FROM waitlist_entry WHERE dinner_id = ?",
    )
    .bind(dinner_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(next)
}

pub async fn member_listed_tx(tx: &mut Tx<'_>, dinner_id: i64, member_id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM waitlist_entry WHERE dinner_id = ? AND member_id = ? LIMIT 1",
    )
    .bind(dinner_id)
    .bind(member_id)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(found.is_some())
}

pub async fn guest_listed_tx(tx: &mut Tx<'_>, dinner_id: i64, email: &str) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM waitlist_entry WHERE dinner_id = ? AND lower(guest_email) = lower(?) LIMIT 1",
    )
    .bind(dinner_id)
    .bind(email)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(found.is_some())
}

pub async fn insert_tx(tx: &mut Tx<'_>, entry: &WaitlistEntry) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO waitlist_entry (id, dinner_id, member_id, guest_name, guest_email, position, status, joined_at, notified_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(entry.id)
    .bind(entry.dinner_id)
    .bind(entry.member_id)
    .bind(&entry.guest_name)
    .bind(&entry.guest_email)
    .bind(entry.position)
    .bind(entry.status)
    .bind(entry.joined_at)
    .bind(entry.notified_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_returning_tx(tx: &mut Tx<'_>, id: i64) -> RepoResult<Option<WaitlistEntry>> {
    let sql = format!("DELETE FROM waitlist_entry WHERE id = ? RETURNING {ENTRY_COLUMNS}");
    let row = sqlx::query_as::<_, WaitlistEntry>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// Close the gap left at `position`
pub async fn shift_after_tx(tx: &mut Tx<'_>, dinner_id: i64, position: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE waitlist_entry SET position = position - 1 WHERE dinner_id = ? AND position > ?",
    )
    .bind(dinner_id)
    .bind(position)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected())
}

/// Notified entries still holding a seat, not counting `except`
pub async fn count_notified_tx(
    tx: &mut Tx<'_>,
    dinner_id: i64,
    except: Option<i64>,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(*) FROM waitlist_entry WHERE dinner_id = ?1 AND status = 'notified' AND (?2 IS NULL OR id != ?2)",
    )
    .bind(dinner_id)
    .bind(except)
    .fetch_one(&mut **tx)
    .await?;
    Ok(count)
}

pub async fn first_waiting_tx(tx: &mut Tx<'_>, dinner_id: i64) -> RepoResult<Option<WaitlistEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM waitlist_entry WHERE dinner_id = ? AND status = 'waiting' ORDER BY position LIMIT 1"
    );
    let row = sqlx::query_as::<_, WaitlistEntry>(&sql)
        .bind(dinner_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

pub async fn set_status_tx(
    tx: &mut Tx<'_>,
    id: i64,
    status: WaitlistStatus,
    notified_at: Option<i64>,
) -> RepoResult<Option<WaitlistEntry>> {
    let sql = format!(
        "UPDATE waitlist_entry SET status = ?1, notified_at = COALESCE(?2, notified_at) WHERE id = ?3 RETURNING {ENTRY_COLUMNS}"
    );
    let row = sqlx::query_as::<_, WaitlistEntry>(&sql)
        .bind(status)
        .bind(notified_at)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

pub async fn waiting_position_of_member(
    pool: &SqlitePool,
    dinner_id: i64,
    member_id: i64,
) -> RepoResult<Option<i64>> {
    let pos = sqlx::query_scalar(
        "SELECT position FROM waitlist_entry WHERE dinner_id = ? AND member_id = ? AND status = 'waiting' LIMIT 1",
    )
    .bind(dinner_id)
    .bind(member_id)
    .fetch_optional(pool)
    .await?;
    Ok(pos)
}

pub async fn waiting_position_of_guest(
    pool: &SqlitePool,
    dinner_id: i64,
    email: &str,
) -> RepoResult<Option<i64>> {
    let pos = sqlx::query_scalar(
        "SELECT position FROM waitlist_entry WHERE dinner_id = ? AND lower(guest_email) = lower(?) AND status = 'waiting' LIMIT 1",
    )
    .bind(dinner_id)
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(pos)
}
