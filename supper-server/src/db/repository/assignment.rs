//! Seat Assignment Repository

use super::{RepoResult, Tx};
use shared::models::{Assignment, AssignmentDetail};
use sqlx::SqlitePool;
use sqlx::types::Json;

const ASSIGNMENT_COLUMNS: &str = "id, dinner_id, member_id, table_number, assigned_at, credit_deducted";

#[derive(sqlx::FromRow)]
struct DetailRow {
    #[sqlx(flatten)]
    detail: AssignmentDetail,
    survey_responses: Option<Json<serde_json::Value>>,
}

/// Assignments of one dinner joined with member details and survey answers,
/// by table then time
pub async fn find_details_by_dinner(
    pool: &SqlitePool,
    dinner_id: i64,
) -> RepoResult<Vec<AssignmentDetail>> {
    let rows = sqlx::query_as::<_, DetailRow>(
        "SELECT da.id, da.member_id, da.table_number, da.assigned_at, da.credit_deducted, m.name, m.email, m.phone, m.credit_balance, sr.responses AS survey_responses FROM dinner_assignment da JOIN member m ON da.member_id = m.id LEFT JOIN survey_response sr ON sr.dinner_id = da.dinner_id AND sr.member_id = da.member_id WHERE da.dinner_id = ? ORDER BY da.table_number, da.assigned_at, da.id",
    )
    .bind(dinner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|row| AssignmentDetail {
            survey_data: row.survey_responses.map(|j| j.0),
            ..row.detail
        })
        .collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Assignment>> {
    let sql = format!("SELECT {ASSIGNMENT_COLUMNS} FROM dinner_assignment WHERE id = ?");
    let row = sqlx::query_as::<_, Assignment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn exists_for_member_tx(
    tx: &mut Tx<'_>,
    dinner_id: i64,
    member_id: i64,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM dinner_assignment WHERE dinner_id = ? AND member_id = ? LIMIT 1",
    )
    .bind(dinner_id)
    .bind(member_id)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(found.is_some())
}

pub async fn insert_tx(tx: &mut Tx<'_>, assignment: &Assignment) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO dinner_assignment (id, dinner_id, member_id, table_number, assigned_at, credit_deducted) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(assignment.id)
    .bind(assignment.dinner_id)
    .bind(assignment.member_id)
    .bind(assignment.table_number)
    .bind(assignment.assigned_at)
    .bind(assignment.credit_deducted)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Delete and hand back the removed row in one statement
pub async fn delete_returning_tx(tx: &mut Tx<'_>, id: i64) -> RepoResult<Option<Assignment>> {
    let sql = format!("DELETE FROM dinner_assignment WHERE id = ? RETURNING {ASSIGNMENT_COLUMNS}");
    let row = sqlx::query_as::<_, Assignment>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

pub async fn update_table(
    pool: &SqlitePool,
    id: i64,
    table_number: i64,
) -> RepoResult<Option<Assignment>> {
    let sql = format!(
        "UPDATE dinner_assignment SET table_number = ? WHERE id = ? RETURNING {ASSIGNMENT_COLUMNS}"
    );
    let row = sqlx::query_as::<_, Assignment>(&sql)
        .bind(table_number)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
