//! Restaurant Partner Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum BookingStatus {
    #[default]
    Available,
    Booked,
    Inactive,
}

/// Restaurant partner with hosting stats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub capacity: Option<i64>,
    pub notes: Option<String>,
    pub booking_status: BookingStatus,
    pub dinners_hosted: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub capacity: Option<i64>,
    pub notes: Option<String>,
}

/// Update restaurant payload (`PUT /api/admin/restaurants`, id in body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub capacity: Option<i64>,
    pub notes: Option<String>,
    pub booking_status: Option<BookingStatus>,
}
