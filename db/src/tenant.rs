use common::error::{AppError, Res};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::tenant::Tenant;

pub async fn count_for_unit(pool: &PgPool, unit_id: Uuid) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tenants WHERE unit_id = $1")
        .bind(unit_id)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)
}

/// Full occupancy history of a unit, most recent move-in first.
pub async fn list_for_unit(pool: &PgPool, unit_id: Uuid) -> Res<Vec<Tenant>> {
    sqlx::query_as::<_, Tenant>(
        "SELECT * FROM tenants WHERE unit_id = $1 ORDER BY start_date DESC",
    )
    .bind(unit_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::from)
}
