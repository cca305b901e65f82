//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{BookingStatus, Restaurant, RestaurantCreate, RestaurantUpdate};
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str = "SELECT r.id, r.name, r.address, r.neighborhood, r.contact_name, r.contact_phone, r.contact_email, r.capacity, r.notes, r.booking_status, (SELECT COUNT(*) FROM dinner d WHERE d.restaurant_id = r.id) AS dinners_hosted, r.created_at, r.updated_at FROM restaurant r";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} ORDER BY r.name");
    let rows = sqlx::query_as::<_, Restaurant>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE r.id = ?");
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO restaurant (id, name, address, neighborhood, contact_name, contact_phone, contact_email, capacity, notes, booking_status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.address)
    .bind(data.neighborhood)
    .bind(data.contact_name)
    .bind(data.contact_phone)
    .bind(data.contact_email)
    .bind(data.capacity)
    .bind(data.notes)
    .bind(BookingStatus::Available)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

/// Partial update; absent fields keep their value
pub async fn update(pool: &SqlitePool, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let id = data.id;
    let rows = sqlx::query(
        "UPDATE restaurant SET name = COALESCE(?1, name), address = COALESCE(?2, address), neighborhood = COALESCE(?3, neighborhood), contact_name = COALESCE(?4, contact_name), contact_phone = COALESCE(?5, contact_phone), contact_email = COALESCE(?6, contact_email), capacity = COALESCE(?7, capacity), notes = COALESCE(?8, notes), booking_status = COALESCE(?9, booking_status), updated_at = ?10 WHERE id = ?11",
    )
    .bind(data.name.map(|n| n.trim().to_string()))
    .bind(data.address)
    .bind(data.neighborhood)
    .bind(data.contact_name)
    .bind(data.contact_phone)
    .bind(data.contact_email)
    .bind(data.capacity)
    .bind(data.notes)
    .bind(data.booking_status)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Hard delete; dinners keep existing with `restaurant_id = NULL`
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM restaurant WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_crud_and_dinners_hosted() {
        let pool = test_pool().await;
        let created = create(
            &pool,
            RestaurantCreate {
                name: "Osteria".into(),
                neighborhood: Some("Mission".into()),
                capacity: Some(12),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(created.booking_status, BookingStatus::Available);
        assert_eq!(created.dinners_hosted, 0);

        sqlx::query(
            "INSERT INTO dinner (id, title, event_date, seats, restaurant_id, created_at, updated_at) VALUES (1, 'Supper', 0, 6, ?, 0, 0)",
        )
        .bind(created.id)
        .execute(&pool)
        .await
        .unwrap();

        let updated = update(
            &pool,
            RestaurantUpdate {
                id: created.id,
                booking_status: Some(BookingStatus::Booked),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.booking_status, BookingStatus::Booked);
        assert_eq!(updated.neighborhood.as_deref(), Some("Mission"));
        assert_eq!(updated.dinners_hosted, 1);

        assert!(delete(&pool, created.id).await.unwrap());
        assert!(!delete(&pool, created.id).await.unwrap());

        let orphan: Option<i64> = sqlx::query_scalar("SELECT restaurant_id FROM dinner WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orphan, None);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let pool = test_pool().await;
        let err = update(
            &pool,
            RestaurantUpdate {
                id: 99,
                name: Some("Nowhere".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
