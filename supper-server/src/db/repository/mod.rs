//! Repository Module
//!
//! SQL accessors as free functions over `&SqlitePool`. Functions taking a
//! `&mut Transaction` are the building blocks of the seating workflow and
//! never commit on their own.

pub mod assignment;
pub mod dinner;
pub mod member;
pub mod restaurant;
pub mod stats;
pub mod survey;
pub mod waitlist;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Shorthand for the transaction type every `*_tx` helper takes
pub type Tx<'c> = sqlx::Transaction<'c, sqlx::Sqlite>;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
