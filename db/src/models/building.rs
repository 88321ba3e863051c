use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Building {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub floors_count: i32,
    pub units_per_floor: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Listing row with per-building unit occupancy counts.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct BuildingSummary {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub floors_count: i32,
    pub units_per_floor: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub total_units: i64,
    pub occupied_units: i64,
    pub available_units: i64,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct BuildingStats {
    pub total_units: i64,
    pub occupied_units: i64,
    pub available_units: i64,
    pub maintenance_units: i64,
    pub total_rent: Option<i64>,
    pub average_rent: Option<f64>,
}
