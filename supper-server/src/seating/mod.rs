//! Seating workflow
//!
//! Capacity checks, seat assignment with credit accounting, and the
//! per-dinner waitlist. Every operation that reads a precondition and then
//! writes runs in one transaction whose first statement write-locks the
//! dinner row (see [`dinner::lock_tx`](crate::db::repository::dinner::lock_tx)),
//! so two admins seating the last spot cannot both succeed.

pub mod assign;
pub mod capacity;
pub mod waitlist;

pub use assign::{AssignMember, RemovedAssignment, assign_member, remove_assignment, update_table};
pub use capacity::check_capacity;
pub use waitlist::{
    JoinWaitlist, Party, convert_entry, join_waitlist, list_waitlist, position_of, promote_next,
    remove_from_waitlist,
};

use crate::db::repository::RepoError;
use shared::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("Event not found")]
    DinnerNotFound(i64),

    #[error("Member not found")]
    MemberNotFound(i64),

    #[error("Assignment not found")]
    AssignmentNotFound(i64),

    #[error("Waitlist entry not found")]
    EntryNotFound(i64),

    #[error("Event is at capacity ({seats} seats)")]
    CapacityExceeded { seats: i64 },

    #[error("Member is already assigned to this event")]
    AlreadyAssigned,

    #[error("Member has no credits remaining")]
    InsufficientCredits,

    #[error("Already on the waitlist for this event")]
    AlreadyOnWaitlist,

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for SeatingError {
    fn from(err: sqlx::Error) -> Self {
        SeatingError::Repo(RepoError::from(err))
    }
}

impl SeatingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DinnerNotFound(_) => ErrorCode::DinnerNotFound,
            Self::MemberNotFound(_) => ErrorCode::MemberNotFound,
            Self::AssignmentNotFound(_) => ErrorCode::AssignmentNotFound,
            Self::EntryNotFound(_) => ErrorCode::WaitlistEntryNotFound,
            Self::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            Self::AlreadyAssigned => ErrorCode::AlreadyAssigned,
            Self::InsufficientCredits => ErrorCode::InsufficientCredits,
            Self::AlreadyOnWaitlist => ErrorCode::AlreadyOnWaitlist,
            Self::Invalid(_) => ErrorCode::ValidationFailed,
            Self::Repo(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<SeatingError> for AppError {
    fn from(err: SeatingError) -> Self {
        match err {
            SeatingError::Repo(repo) => repo.into(),
            other => AppError::with_message(other.code(), other.to_string()),
        }
    }
}

pub type SeatingResult<T> = Result<T, SeatingError>;
