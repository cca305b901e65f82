//! Error codes used by the server and the admin UI
//!
//! Codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Seating errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum, serialized as its `u16` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Seating ====================
    /// Dinner does not exist
    DinnerNotFound = 4001,
    /// Assignment would exceed the dinner's seat count
    CapacityExceeded = 4002,
    /// Member has no credit and no active subscription
    InsufficientCredits = 4003,
    /// Member already holds a seat at this dinner
    AlreadyAssigned = 4004,
    /// Assignment does not exist
    AssignmentNotFound = 4005,
    /// Waitlist entry does not exist
    WaitlistEntryNotFound = 4006,
    /// Member or guest is already on this dinner's waitlist
    AlreadyOnWaitlist = 4007,
    /// Member does not exist
    MemberNotFound = 4008,
    /// Restaurant does not exist
    RestaurantNotFound = 4009,
    /// Survey question does not exist
    SurveyNotFound = 4010,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Unauthorized",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Seating
            ErrorCode::DinnerNotFound => "Event not found",
            ErrorCode::CapacityExceeded => "Event is at capacity",
            ErrorCode::InsufficientCredits => "Member has no credits left",
            ErrorCode::AlreadyAssigned => "Member is already assigned to this event",
            ErrorCode::AssignmentNotFound => "Assignment not found",
            ErrorCode::WaitlistEntryNotFound => "Waitlist entry not found",
            ErrorCode::AlreadyOnWaitlist => "Already on the waitlist for this event",
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::SurveyNotFound => "Survey question not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Seating
            4001 => Ok(ErrorCode::DinnerNotFound),
            4002 => Ok(ErrorCode::CapacityExceeded),
            4003 => Ok(ErrorCode::InsufficientCredits),
            4004 => Ok(ErrorCode::AlreadyAssigned),
            4005 => Ok(ErrorCode::AssignmentNotFound),
            4006 => Ok(ErrorCode::WaitlistEntryNotFound),
            4007 => Ok(ErrorCode::AlreadyOnWaitlist),
            4008 => Ok(ErrorCode::MemberNotFound),
            4009 => Ok(ErrorCode::RestaurantNotFound),
            4010 => Ok(ErrorCode::SurveyNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
