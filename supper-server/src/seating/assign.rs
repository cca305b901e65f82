//! Assignment Writer and Remover
//!
//! A seat costs one credit unless the member has an active subscription.
//! `credit_deducted` on the assignment records which case applied, and the
//! remover refunds exactly when it is set.

use super::capacity::capacity_tx;
use super::{SeatingError, SeatingResult};
use crate::db::repository::{Tx, assignment, dinner, member, waitlist};
use shared::models::{Assignment, SubscriptionStatus};
use sqlx::SqlitePool;

/// Seat request; `table_number` defaults to 1
#[derive(Debug, Clone, Copy)]
pub struct AssignMember {
    pub dinner_id: i64,
    pub member_id: i64,
    pub table_number: Option<i64>,
}

/// What a successful removal took away
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedAssignment {
    pub dinner_id: i64,
    pub member_id: i64,
    pub credit_refunded: bool,
}

fn table_or_default(table_number: Option<i64>) -> SeatingResult<i64> {
    let table = table_number.unwrap_or(1);
    if table < 1 {
        return Err(SeatingError::Invalid("table_number must be at least 1".into()));
    }
    Ok(table)
}

/// Seat a member at a dinner, debiting a credit when required
pub async fn assign_member(pool: &SqlitePool, req: AssignMember) -> SeatingResult<Assignment> {
    let table_number = table_or_default(req.table_number)?;
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;
    if !dinner::lock_tx(&mut tx, req.dinner_id, now).await? {
        return Err(SeatingError::DinnerNotFound(req.dinner_id));
    }
    let created =
        assign_locked(&mut tx, req.dinner_id, req.member_id, table_number, None, now).await?;
    tx.commit().await?;

    tracing::info!(
        assignment_id = created.id,
        dinner_id = created.dinner_id,
        member_id = created.member_id,
        table_number = created.table_number,
        credit_deducted = created.credit_deducted,
        "Member assigned"
    );
    Ok(created)
}

/// Assignment steps under an already held dinner lock.
///
/// Seats held by notified waitlist entries count as taken, except the one
/// held by `holder` (the entry being converted). Any error leaves the
/// transaction to be dropped, which rolls back a debit made before a later
/// failure.
pub(crate) async fn assign_locked(
    tx: &mut Tx<'_>,
    dinner_id: i64,
    member_id: i64,
    table_number: i64,
    holder: Option<i64>,
    now: i64,
) -> SeatingResult<Assignment> {
    let capacity = capacity_tx(tx, dinner_id).await?;
    let held = waitlist::count_notified_tx(tx, dinner_id, holder).await?;
    if capacity.current_assignments + held >= capacity.seats {
        return Err(SeatingError::CapacityExceeded {
            seats: capacity.seats,
        });
    }

    let seated = member::find_by_id_tx(tx, member_id)
        .await?
        .ok_or(SeatingError::MemberNotFound(member_id))?;

    if assignment::exists_for_member_tx(tx, dinner_id, member_id).await? {
        return Err(SeatingError::AlreadyAssigned);
    }

    let credit_deducted = if seated.subscription_status == SubscriptionStatus::Active {
        false
    } else if member::debit_credit_tx(tx, member_id, now).await? {
        true
    } else {
        return Err(SeatingError::InsufficientCredits);
    };

    let created = Assignment {
        id: shared::util::snowflake_id(),
        dinner_id,
        member_id,
        table_number,
        assigned_at: now,
        credit_deducted,
    };
    assignment::insert_tx(tx, &created).await?;
    member::adjust_attendance_tx(tx, member_id, 1).await?;

    Ok(created)
}

/// Remove an assignment and refund its credit if one was taken.
///
/// Unknown ids are a no-op (`None`), so repeating a removal never refunds twice.
pub async fn remove_assignment(
    pool: &SqlitePool,
    assignment_id: i64,
) -> SeatingResult<Option<RemovedAssignment>> {
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;
    let Some(removed) = assignment::delete_returning_tx(&mut tx, assignment_id).await? else {
        tracing::debug!(assignment_id, "Assignment already gone, nothing to remove");
        return Ok(None);
    };

    if removed.credit_deducted {
        member::refund_credit_tx(&mut tx, removed.member_id, now).await?;
    }
    member::adjust_attendance_tx(&mut tx, removed.member_id, -1).await?;
    tx.commit().await?;

    tracing::info!(
        assignment_id,
        dinner_id = removed.dinner_id,
        member_id = removed.member_id,
        credit_refunded = removed.credit_deducted,
        "Assignment removed"
    );

    Ok(Some(RemovedAssignment {
        dinner_id: removed.dinner_id,
        member_id: removed.member_id,
        credit_refunded: removed.credit_deducted,
    }))
}

/// Move an assignment to another table
pub async fn update_table(
    pool: &SqlitePool,
    assignment_id: i64,
    table_number: i64,
) -> SeatingResult<Assignment> {
    let table_number = table_or_default(Some(table_number))?;
    assignment::update_table(pool, assignment_id, table_number)
        .await?
        .ok_or(SeatingError::AssignmentNotFound(assignment_id))
}
