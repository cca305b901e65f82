//! Seat Assignment Model

use serde::{Deserialize, Serialize};

/// Seat assignment binding one member to one dinner and table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Assignment {
    pub id: i64,
    #[serde(rename = "event_id")]
    pub dinner_id: i64,
    #[serde(rename = "user_id")]
    pub member_id: i64,
    pub table_number: i64,
    pub assigned_at: i64,
    /// Whether one credit was taken from the member when the seat was assigned
    pub credit_deducted: bool,
}

/// Assignment joined with member details (groups page)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AssignmentDetail {
    pub id: i64,
    #[serde(rename = "user_id")]
    pub member_id: i64,
    pub table_number: i64,
    pub assigned_at: i64,
    pub credit_deducted: bool,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub credit_balance: i64,
    /// Member's survey answers for this dinner, if submitted
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub survey_data: Option<serde_json::Value>,
}

/// `POST /api/admin/groups` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentCreate {
    pub event_id: Option<i64>,
    pub user_id: Option<i64>,
    pub table_number: Option<i64>,
}

/// `PUT /api/admin/groups` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableUpdate {
    pub assignment_id: Option<i64>,
    pub table_number: Option<i64>,
}
