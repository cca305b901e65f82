//! Capacity Checker

use super::{SeatingError, SeatingResult};
use crate::db::repository::{Tx, dinner};
use shared::models::Capacity;
use sqlx::SqlitePool;

/// Seats, current assignments and free spots of a dinner. No side effects.
pub async fn check_capacity(pool: &SqlitePool, dinner_id: i64) -> SeatingResult<Capacity> {
    let dinner = dinner::find_by_id(pool, dinner_id)
        .await?
        .ok_or(SeatingError::DinnerNotFound(dinner_id))?;
    let current = dinner::count_assignments(pool, dinner_id).await?;
    Ok(Capacity::new(dinner_id, dinner.seats, current))
}

/// Same figures read inside a seating transaction (lock already held)
pub(crate) async fn capacity_tx(tx: &mut Tx<'_>, dinner_id: i64) -> SeatingResult<Capacity> {
    let dinner = dinner::find_by_id_tx(tx, dinner_id)
        .await?
        .ok_or(SeatingError::DinnerNotFound(dinner_id))?;
    let current = dinner::count_assignments_tx(tx, dinner_id).await?;
    Ok(Capacity::new(dinner_id, dinner.seats, current))
}
