use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Occupancy record for a unit. An open-ended `end_date` marks the
/// current tenant.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Tenant {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
