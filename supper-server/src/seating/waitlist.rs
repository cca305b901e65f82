//! Waitlist Manager
//!
//! Positions stay exactly `1..=N` per dinner: joins append at `max + 1`,
//! removals shift every later entry down by one, and promotion only flips
//! status. A `notified` entry keeps its position and holds a seat until it
//! is converted or withdrawn.

use super::assign::assign_locked;
use super::capacity::capacity_tx;
use super::{SeatingError, SeatingResult};
use crate::db::repository::{Tx, dinner, member, waitlist};
use crate::notify::WaitlistNotifier;
use shared::models::{Assignment, WaitlistEntry, WaitlistStatus};
use sqlx::SqlitePool;

/// Who holds a waitlist entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Party {
    Member(i64),
    Guest { name: Option<String>, email: String },
}

#[derive(Debug, Clone)]
pub struct JoinWaitlist {
    pub dinner_id: i64,
    pub party: Party,
}

/// Append a member or guest to the end of a dinner's waitlist
pub async fn join_waitlist(pool: &SqlitePool, req: JoinWaitlist) -> SeatingResult<WaitlistEntry> {
    if let Party::Guest { email, .. } = &req.party
        && email.trim().is_empty()
    {
        return Err(SeatingError::Invalid(
            "Either user_id or guest_email is required".into(),
        ));
    }
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;
    if !dinner::lock_tx(&mut tx, req.dinner_id, now).await? {
        return Err(SeatingError::DinnerNotFound(req.dinner_id));
    }

    let (member_id, guest_name, guest_email) = match req.party {
        Party::Member(id) => {
            if member::find_by_id_tx(&mut tx, id).await?.is_none() {
                return Err(SeatingError::MemberNotFound(id));
            }
            if waitlist::member_listed_tx(&mut tx, req.dinner_id, id).await? {
                return Err(SeatingError::AlreadyOnWaitlist);
            }
            (Some(id), None, None)
        }
        Party::Guest { name, email } => {
            let email = email.trim().to_string();
            if waitlist::guest_listed_tx(&mut tx, req.dinner_id, &email).await? {
                return Err(SeatingError::AlreadyOnWaitlist);
            }
            let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
            (None, name, Some(email))
        }
    };

    let entry = WaitlistEntry {
        id: shared::util::snowflake_id(),
        dinner_id: req.dinner_id,
        member_id,
        guest_name,
        guest_email,
        position: waitlist::next_position_tx(&mut tx, req.dinner_id).await?,
        status: WaitlistStatus::Waiting,
        joined_at: now,
        notified_at: None,
    };
    waitlist::insert_tx(&mut tx, &entry).await?;
    tx.commit().await?;

    tracing::info!(
        entry_id = entry.id,
        dinner_id = entry.dinner_id,
        position = entry.position,
        "Joined waitlist"
    );
    Ok(entry)
}

/// Delete an entry and close the gap; `None` if the id is unknown.
///
/// A withdrawn `notified` entry frees the seat it held; callers promote the
/// next party afterwards.
pub async fn remove_from_waitlist(
    pool: &SqlitePool,
    entry_id: i64,
) -> SeatingResult<Option<WaitlistEntry>> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    if !dinner::lock_for_entry_tx(&mut tx, entry_id, now).await? {
        return Ok(None);
    }
    let Some(removed) = remove_locked(&mut tx, entry_id).await? else {
        return Ok(None);
    };
    tx.commit().await?;

    tracing::info!(
        entry_id,
        dinner_id = removed.dinner_id,
        position = removed.position,
        status = ?removed.status,
        "Removed from waitlist"
    );
    Ok(Some(removed))
}

async fn remove_locked(tx: &mut Tx<'_>, entry_id: i64) -> SeatingResult<Option<WaitlistEntry>> {
    let Some(removed) = waitlist::delete_returning_tx(tx, entry_id).await? else {
        return Ok(None);
    };
    waitlist::shift_after_tx(tx, removed.dinner_id, removed.position).await?;
    Ok(Some(removed))
}

/// Notify the next waiting party if a seat is free.
///
/// Free seats are `seats - assignments - notified entries`, so a seat already
/// promised to someone is not promised twice.
pub async fn promote_next(
    pool: &SqlitePool,
    notifier: &dyn WaitlistNotifier,
    dinner_id: i64,
) -> SeatingResult<Option<WaitlistEntry>> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    if !dinner::lock_tx(&mut tx, dinner_id, now).await? {
        return Err(SeatingError::DinnerNotFound(dinner_id));
    }

    let capacity = capacity_tx(&mut tx, dinner_id).await?;
    let held = waitlist::count_notified_tx(&mut tx, dinner_id, None).await?;
    if capacity.available_spots - held <= 0 {
        return Ok(None);
    }

    let Some(next) = waitlist::first_waiting_tx(&mut tx, dinner_id).await? else {
        return Ok(None);
    };
    let notified = waitlist::set_status_tx(&mut tx, next.id, WaitlistStatus::Notified, Some(now))
        .await?
        .ok_or(SeatingError::EntryNotFound(next.id))?;
    tx.commit().await?;

    tracing::info!(
        entry_id = notified.id,
        dinner_id,
        position = notified.position,
        "Waitlist entry promoted"
    );

    if let Err(e) = notifier.spot_available(&notified).await {
        tracing::warn!(entry_id = notified.id, error = %e, "Waitlist notification failed");
    }

    Ok(Some(notified))
}

/// Turn a member's waitlist entry into a seat assignment.
///
/// Capacity, duplicate and credit checks are the assignment writer's. The
/// entry is marked converted and removed in the same transaction.
pub async fn convert_entry(
    pool: &SqlitePool,
    entry_id: i64,
    table_number: Option<i64>,
) -> SeatingResult<Assignment> {
    let table_number = table_number.unwrap_or(1);
    if table_number < 1 {
        return Err(SeatingError::Invalid("table_number must be at least 1".into()));
    }
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    if !dinner::lock_for_entry_tx(&mut tx, entry_id, now).await? {
        return Err(SeatingError::EntryNotFound(entry_id));
    }
    let entry = waitlist::find_by_id_tx(&mut tx, entry_id)
        .await?
        .ok_or(SeatingError::EntryNotFound(entry_id))?;

    if entry.status == WaitlistStatus::Converted {
        return Err(SeatingError::Invalid(
            "Waitlist entry was already converted".into(),
        ));
    }
    let Some(member_id) = entry.member_id else {
        return Err(SeatingError::Invalid(
            "Guest waitlist entries cannot be assigned a seat".into(),
        ));
    };

    // A notified entry takes the seat it holds
    let created = assign_locked(
        &mut tx,
        entry.dinner_id,
        member_id,
        table_number,
        Some(entry_id),
        now,
    )
    .await?;
    waitlist::set_status_tx(&mut tx, entry_id, WaitlistStatus::Converted, None).await?;
    remove_locked(&mut tx, entry_id).await?;
    tx.commit().await?;

    tracing::info!(
        entry_id,
        assignment_id = created.id,
        dinner_id = created.dinner_id,
        "Waitlist entry converted"
    );
    Ok(created)
}

/// 1-based position of a party still waiting; `None` if not waiting
pub async fn position_of(
    pool: &SqlitePool,
    dinner_id: i64,
    party: &Party,
) -> SeatingResult<Option<i64>> {
    let pos = match party {
        Party::Member(id) => waitlist::waiting_position_of_member(pool, dinner_id, *id).await?,
        Party::Guest { email, .. } => {
            waitlist::waiting_position_of_guest(pool, dinner_id, email.trim()).await?
        }
    };
    Ok(pos)
}

/// Entries of a dinner ordered by position
pub async fn list_waitlist(pool: &SqlitePool, dinner_id: i64) -> SeatingResult<Vec<WaitlistEntry>> {
    if dinner::find_by_id(pool, dinner_id).await?.is_none() {
        return Err(SeatingError::DinnerNotFound(dinner_id));
    }
    Ok(waitlist::find_by_dinner(pool, dinner_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fixtures, test_pool};
    use crate::notify::testing::RecordingNotifier;
    use crate::seating::{AssignMember, assign_member, check_capacity, remove_assignment};
    use shared::models::SubscriptionStatus;

    fn guest(email: &str) -> Party {
        Party::Guest {
            name: Some("Guest".into()),
            email: email.into(),
        }
    }

    async fn join(pool: &SqlitePool, dinner_id: i64, party: Party) -> WaitlistEntry {
        join_waitlist(pool, JoinWaitlist { dinner_id, party }).await.unwrap()
    }

    async fn fill(pool: &SqlitePool, dinner_id: i64, seats: i64) -> Vec<i64> {
        let mut ids = Vec::new();
        for i in 0..seats {
            let m = fixtures::member(pool, &format!("F{i}"), 0, SubscriptionStatus::Active).await;
            let a = assign_member(
                pool,
                AssignMember {
                    dinner_id,
                    member_id: m,
                    table_number: None,
                },
            )
            .await
            .unwrap();
            ids.push(a.id);
        }
        ids
    }

    #[tokio::test]
    async fn test_join_appends_and_remove_keeps_positions_dense() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 2).await;

        let a = join(&pool, dinner, guest("a@example.com")).await;
        let b = join(&pool, dinner, guest("b@example.com")).await;
        let c = join(&pool, dinner, guest("c@example.com")).await;
        assert_eq!((a.position, b.position, c.position), (1, 2, 3));

        assert!(remove_from_waitlist(&pool, b.id).await.unwrap().is_some());
        assert_eq!(waitlist::positions(&pool, dinner).await.unwrap(), vec![1, 2]);
        let c_now = waitlist::find_by_id(&pool, c.id).await.unwrap().unwrap();
        assert_eq!(c_now.position, 2);

        let d = join(&pool, dinner, guest("d@example.com")).await;
        assert_eq!(d.position, 3);

        assert!(remove_from_waitlist(&pool, b.id).await.unwrap().is_none());
        assert!(remove_from_waitlist(&pool, a.id).await.unwrap().is_some());
        assert_eq!(waitlist::positions(&pool, dinner).await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_join_validation() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 2).await;
        let m = fixtures::member(&pool, "Pia", 1, SubscriptionStatus::Inactive).await;

        let err = join_waitlist(&pool, JoinWaitlist { dinner_id: dinner, party: guest("  ") })
            .await
            .unwrap_err();
        assert!(matches!(err, SeatingError::Invalid(_)));

        let err = join_waitlist(&pool, JoinWaitlist { dinner_id: dinner + 1, party: Party::Member(m) })
            .await
            .unwrap_err();
        assert!(matches!(err, SeatingError::DinnerNotFound(_)));

        let err = join_waitlist(&pool, JoinWaitlist { dinner_id: dinner, party: Party::Member(m + 1) })
            .await
            .unwrap_err();
        assert!(matches!(err, SeatingError::MemberNotFound(_)));

        join(&pool, dinner, Party::Member(m)).await;
        let err = join_waitlist(&pool, JoinWaitlist { dinner_id: dinner, party: Party::Member(m) })
            .await
            .unwrap_err();
        assert!(matches!(err, SeatingError::AlreadyOnWaitlist));

        join(&pool, dinner, guest("Same@Example.com")).await;
        let err = join_waitlist(&pool, JoinWaitlist { dinner_id: dinner, party: guest("same@example.com") })
            .await
            .unwrap_err();
        assert!(matches!(err, SeatingError::AlreadyOnWaitlist));
    }

    #[tokio::test]
    async fn test_promote_after_cancellation() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 2).await;
        let seats = fill(&pool, dinner, 2).await;
        let first = join(&pool, dinner, guest("first@example.com")).await;
        let second = join(&pool, dinner, guest("second@example.com")).await;
        let notifier = RecordingNotifier::default();

        // full dinner: nothing to promote
        assert_eq!(promote_next(&pool, &notifier, dinner).await.unwrap(), None);

        remove_assignment(&pool, seats[0]).await.unwrap();
        let promoted = promote_next(&pool, &notifier, dinner).await.unwrap().unwrap();
        assert_eq!(promoted.id, first.id);
        assert_eq!(promoted.status, WaitlistStatus::Notified);
        assert!(promoted.notified_at.is_some());
        assert_eq!(promoted.position, 1);
        assert_eq!(notifier.sent(), vec![first.id]);

        // the freed seat is held by the notified entry
        assert_eq!(promote_next(&pool, &notifier, dinner).await.unwrap(), None);
        let second_now = waitlist::find_by_id(&pool, second.id).await.unwrap().unwrap();
        assert_eq!(second_now.status, WaitlistStatus::Waiting);
        assert_eq!(waitlist::positions(&pool, dinner).await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_promote_survives_notifier_failure() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 1).await;
        let entry = join(&pool, dinner, guest("x@example.com")).await;
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };

        let promoted = promote_next(&pool, &notifier, dinner).await.unwrap().unwrap();
        assert_eq!(promoted.id, entry.id);
        let stored = waitlist::find_by_id(&pool, entry.id).await.unwrap().unwrap();
        assert_eq!(stored.status, WaitlistStatus::Notified);
    }

    #[tokio::test]
    async fn test_promote_unknown_dinner() {
        let pool = test_pool().await;
        let err = promote_next(&pool, &RecordingNotifier::default(), 77)
            .await
            .unwrap_err();
        assert!(matches!(err, SeatingError::DinnerNotFound(77)));
    }

    #[tokio::test]
    async fn test_convert_member_entry() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 2).await;
        let m = fixtures::member(&pool, "Quin", 2, SubscriptionStatus::Inactive).await;
        let before = join(&pool, dinner, guest("g@example.com")).await;
        let entry = join(&pool, dinner, Party::Member(m)).await;
        let after = join(&pool, dinner, guest("h@example.com")).await;

        let created = convert_entry(&pool, entry.id, Some(2)).await.unwrap();
        assert_eq!(created.member_id, m);
        assert_eq!(created.table_number, 2);
        assert!(created.credit_deducted);
        assert_eq!(fixtures::balance(&pool, m).await, 1);

        assert!(waitlist::find_by_id(&pool, entry.id).await.unwrap().is_none());
        assert_eq!(waitlist::positions(&pool, dinner).await.unwrap(), vec![1, 2]);
        let after_now = waitlist::find_by_id(&pool, after.id).await.unwrap().unwrap();
        assert_eq!(after_now.position, 2);
        assert_eq!(
            waitlist::find_by_id(&pool, before.id).await.unwrap().unwrap().position,
            1
        );
        assert_eq!(check_capacity(&pool, dinner).await.unwrap().current_assignments, 1);

        let err = convert_entry(&pool, entry.id, None).await.unwrap_err();
        assert!(matches!(err, SeatingError::EntryNotFound(_)));
    }

    #[tokio::test]
    async fn test_convert_rejects_guest_and_rolls_back_on_capacity() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 1).await;
        let g = join(&pool, dinner, guest("guest@example.com")).await;
        let err = convert_entry(&pool, g.id, None).await.unwrap_err();
        assert!(matches!(err, SeatingError::Invalid(_)));

        fill(&pool, dinner, 1).await;
        let m = fixtures::member(&pool, "Rae", 1, SubscriptionStatus::Inactive).await;
        let entry = join(&pool, dinner, Party::Member(m)).await;

        let err = convert_entry(&pool, entry.id, None).await.unwrap_err();
        assert!(matches!(err, SeatingError::CapacityExceeded { seats: 1 }));
        // entry untouched, credit untouched
        let stored = waitlist::find_by_id(&pool, entry.id).await.unwrap().unwrap();
        assert_eq!(stored.status, WaitlistStatus::Waiting);
        assert_eq!(stored.position, 2);
        assert_eq!(fixtures::balance(&pool, m).await, 1);
    }

    #[tokio::test]
    async fn test_position_only_counts_waiting() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 1).await;
        let m = fixtures::member(&pool, "Sol", 1, SubscriptionStatus::Inactive).await;
        join(&pool, dinner, guest("lead@example.com")).await;
        join(&pool, dinner, Party::Member(m)).await;

        assert_eq!(position_of(&pool, dinner, &Party::Member(m)).await.unwrap(), Some(2));
        assert_eq!(
            position_of(&pool, dinner, &guest("LEAD@example.com")).await.unwrap(),
            Some(1)
        );
        assert_eq!(
            position_of(&pool, dinner, &guest("nobody@example.com")).await.unwrap(),
            None
        );

        // the lead gets notified and drops out of "waiting"
        promote_next(&pool, &RecordingNotifier::default(), dinner).await.unwrap();
        assert_eq!(
            position_of(&pool, dinner, &guest("lead@example.com")).await.unwrap(),
            None
        );
        assert_eq!(position_of(&pool, dinner, &Party::Member(m)).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_list_fills_member_details() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 1).await;
        let m = fixtures::member(&pool, "Tam", 1, SubscriptionStatus::Inactive).await;
        join(&pool, dinner, Party::Member(m)).await;
        join(&pool, dinner, guest("walkin@example.com")).await;

        let list = list_waitlist(&pool, dinner).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].member_id, Some(m));
        assert_eq!(list[0].guest_name.as_deref(), Some("Tam"));
        assert!(list[0].guest_email.as_deref().unwrap().starts_with("tam-"));
        assert_eq!(list[1].guest_email.as_deref(), Some("walkin@example.com"));

        assert!(matches!(
            list_waitlist(&pool, dinner + 1).await.unwrap_err(),
            SeatingError::DinnerNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_notified_entry_holds_its_seat() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 1).await;
        let ann = fixtures::member(&pool, "Ann", 1, SubscriptionStatus::Inactive).await;
        let ben = fixtures::member(&pool, "Ben", 1, SubscriptionStatus::Inactive).await;
        let cal = fixtures::member(&pool, "Cal", 1, SubscriptionStatus::Inactive).await;
        let first = join(&pool, dinner, Party::Member(ann)).await;
        let second = join(&pool, dinner, Party::Member(ben)).await;

        let notified = promote_next(&pool, &RecordingNotifier::default(), dinner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(notified.id, first.id);

        // neither a later entry nor a direct assignment may take the held seat
        let err = convert_entry(&pool, second.id, None).await.unwrap_err();
        assert!(matches!(err, SeatingError::CapacityExceeded { seats: 1 }));
        let err = assign_member(
            &pool,
            AssignMember {
                dinner_id: dinner,
                member_id: cal,
                table_number: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SeatingError::CapacityExceeded { seats: 1 }));
        assert_eq!(fixtures::balance(&pool, ben).await, 1);
        assert_eq!(fixtures::balance(&pool, cal).await, 1);

        let created = convert_entry(&pool, first.id, None).await.unwrap();
        assert_eq!(created.member_id, ann);
        assert_eq!(waitlist::positions(&pool, dinner).await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_withdrawn_notified_entry_frees_its_seat() {
        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 1).await;
        let first = join(&pool, dinner, guest("first@example.com")).await;
        let second = join(&pool, dinner, guest("second@example.com")).await;
        let notifier = RecordingNotifier::default();

        promote_next(&pool, &notifier, dinner).await.unwrap();
        assert_eq!(promote_next(&pool, &notifier, dinner).await.unwrap(), None);

        let removed = remove_from_waitlist(&pool, first.id).await.unwrap().unwrap();
        assert_eq!(removed.status, WaitlistStatus::Notified);

        let next = promote_next(&pool, &notifier, dinner).await.unwrap().unwrap();
        assert_eq!(next.id, second.id);
        assert_eq!(next.position, 1);
        assert_eq!(notifier.sent(), vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_positions_stay_dense_under_random_joins_and_removals() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let pool = test_pool().await;
        let dinner = fixtures::dinner(&pool, 4).await;
        let mut rng = StdRng::seed_from_u64(0x5EA7);
        let mut listed: Vec<i64> = Vec::new();

        for step in 0..80 {
            if listed.is_empty() || rng.gen_bool(0.6) {
                let entry = join(&pool, dinner, guest(&format!("g{step}@example.com"))).await;
                assert_eq!(entry.position, listed.len() as i64 + 1);
                listed.push(entry.id);
            } else {
                let victim = listed.remove(rng.gen_range(0..listed.len()));
                assert!(remove_from_waitlist(&pool, victim).await.unwrap().is_some());
            }

            let expected: Vec<i64> = (1..=listed.len() as i64).collect();
            assert_eq!(
                waitlist::positions(&pool, dinner).await.unwrap(),
                expected,
                "step {step}"
            );
        }

        // relative order is join order
        let order: Vec<i64> = list_waitlist(&pool, dinner)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(order, listed);
    }
}
