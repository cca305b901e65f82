//! Member Model

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum MemberRole {
    #[default]
    User,
    Admin,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Subscription state; `Active` members attend without spending credits
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum SubscriptionStatus {
    Active,
    #[default]
    Inactive,
    Paused,
}

/// Member entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: MemberRole,
    pub credit_balance: i64,
    pub subscription_status: SubscriptionStatus,
    pub attendance_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Login lookup row (never serialized)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MemberCredentials {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub password_hash: Option<String>,
}

/// Create member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<MemberRole>,
    pub password: Option<String>,
    pub credit_balance: Option<i64>,
    pub subscription_status: Option<SubscriptionStatus>,
}

/// Member eligible for a seat at a dinner (groups page side panel)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AvailableMember {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub credit_balance: i64,
    pub subscription_status: SubscriptionStatus,
}
