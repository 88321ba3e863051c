use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "unit_status", rename_all = "lowercase")]
pub enum UnitStatus {
    Available,
    Occupied,
    Maintenance,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Unit {
    pub id: Uuid,
    pub building_id: Uuid,
    pub unit_number: String,
    pub floor_number: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: Option<f64>,
    pub rent_amount: Option<i64>,
    pub status: UnitStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Unit joined with its building for listing and detail views.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct UnitWithBuilding {
    pub id: Uuid,
    pub building_id: Uuid,
    pub unit_number: String,
    pub floor_number: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: Option<f64>,
    pub rent_amount: Option<i64>,
    pub status: UnitStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub building_name: String,
    pub building_address: String,
}
