//! Waitlist notification dispatch
//!
//! Promotion commits first and notifies afterwards; a failed delivery is
//! logged and never undoes the promotion.

use async_trait::async_trait;
use shared::models::WaitlistEntry;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Tells a waitlisted party that a seat opened up
#[async_trait]
pub trait WaitlistNotifier: Send + Sync {
    async fn spot_available(&self, entry: &WaitlistEntry) -> Result<(), NotifyError>;
}

/// Records notifications in the log only
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl WaitlistNotifier for LogNotifier {
    async fn spot_available(&self, entry: &WaitlistEntry) -> Result<(), NotifyError> {
        tracing::info!(
            entry_id = entry.id,
            dinner_id = entry.dinner_id,
            member_id = ?entry.member_id,
            guest_email = ?entry.guest_email,
            position = entry.position,
            "Waitlist spot available"
        );
        Ok(())
    }
}
