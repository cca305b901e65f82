//! Member Repository

use super::{RepoError, RepoResult, Tx};
use shared::models::{
    AvailableMember, Member, MemberCreate, MemberCredentials, MemberRole, SubscriptionStatus,
};
use sqlx::SqlitePool;

const MEMBER_SELECT: &str = "SELECT id, name, email, phone, role, credit_balance, subscription_status, attendance_count, created_at, updated_at FROM member";

/// All non-admin members, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE role = 'user' ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Member>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id_tx(tx: &mut Tx<'_>, id: i64) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// Login lookup; email comparison is case-insensitive
pub async fn find_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> RepoResult<Option<MemberCredentials>> {
    let row = sqlx::query_as::<_, MemberCredentials>(
        "SELECT id, name, email, role, password_hash FROM member WHERE lower(email) = lower(?) LIMIT 1",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a member; `password_hash` is already an argon2 PHC string
pub async fn create(
    pool: &SqlitePool,
    data: MemberCreate,
    password_hash: Option<String>,
) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let credit_balance = data.credit_balance.unwrap_or(0);
    if credit_balance < 0 {
        return Err(RepoError::Validation(
            "credit_balance must not be negative".into(),
        ));
    }

    sqlx::query(
        "INSERT INTO member (id, name, email, phone, role, password_hash, credit_balance, subscription_status, attendance_count, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9, ?9)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.email.trim())
    .bind(data.phone)
    .bind(data.role.unwrap_or(MemberRole::User))
    .bind(password_hash)
    .bind(credit_balance)
    .bind(data.subscription_status.unwrap_or(SubscriptionStatus::Inactive))
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Email '{}' already exists", data.email.trim()))
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

/// Members who could take a seat at the dinner: plain users with a credit or
/// an active subscription, not already assigned there
pub async fn find_available_for_dinner(
    pool: &SqlitePool,
    dinner_id: i64,
) -> RepoResult<Vec<AvailableMember>> {
    let rows = sqlx::query_as::<_, AvailableMember>(
        "SELECT m.id, m.name, m.email, m.credit_balance, m.subscription_status FROM member m WHERE m.role = 'user' AND (m.credit_balance > 0 OR m.subscription_status = 'active') AND m.id NOT IN (SELECT member_id FROM dinner_assignment WHERE dinner_id = ?) ORDER BY m.name",
    )
    .bind(dinner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Take one credit if the balance allows it; `false` means nothing changed
pub async fn debit_credit_tx(tx: &mut Tx<'_>, member_id: i64, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE member SET credit_balance = credit_balance - 1, updated_at = ?1 WHERE id = ?2 AND credit_balance > 0",
    )
    .bind(now)
    .bind(member_id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Give back exactly one credit
pub async fn refund_credit_tx(tx: &mut Tx<'_>, member_id: i64, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE member SET credit_balance = credit_balance + 1, updated_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(member_id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Adjust the seated-dinner counter by `delta`, never below zero
pub async fn adjust_attendance_tx(tx: &mut Tx<'_>, member_id: i64, delta: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE member SET attendance_count = MAX(0, attendance_count + ?1) WHERE id = ?2",
    )
    .bind(delta)
    .bind(member_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
