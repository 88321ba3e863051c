use common::error::{AppError, Res};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::building::{BuildingPatch, NewBuilding},
    models::building::{Building, BuildingStats, BuildingSummary},
};

const SUMMARY_SELECT: &str = r#"
    SELECT b.*,
        (SELECT COUNT(*) FROM units WHERE building_id = b.id) AS total_units,
        (SELECT COUNT(*) FROM units WHERE building_id = b.id AND status = 'occupied') AS occupied_units,
        (SELECT COUNT(*) FROM units WHERE building_id = b.id AND status = 'available') AS available_units
    FROM buildings b
"#;

pub async fn list_for_customer(pool: &PgPool, customer_id: Uuid) -> Res<Vec<BuildingSummary>> {
    let query = format!("{SUMMARY_SELECT} WHERE b.customer_id = $1 ORDER BY b.created_at DESC");
    sqlx::query_as::<_, BuildingSummary>(&query)
        .bind(customer_id)
        .fetch_all(pool)
        .await
        .map_err(AppError::from)
}

pub async fn find_summary(
    pool: &PgPool,
    id: Uuid,
    customer_id: Uuid,
) -> Res<Option<BuildingSummary>> {
    let query = format!("{SUMMARY_SELECT} WHERE b.id = $1 AND b.customer_id = $2");
    sqlx::query_as::<_, BuildingSummary>(&query)
        .bind(id)
        .bind(customer_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)
}

/// Ownership check: scoping by customer_id in the WHERE clause means a
/// foreign building surfaces as absent, not forbidden.
pub async fn exists_owned(pool: &PgPool, id: Uuid, customer_id: Uuid) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM buildings WHERE id = $1 AND customer_id = $2)",
    )
    .bind(id)
    .bind(customer_id)
    .fetch_one(pool)
    .await
    .map_err(AppError::from)
}

pub async fn insert(pool: &PgPool, data: NewBuilding) -> Res<Building> {
    sqlx::query_as::<_, Building>(
        r#"
        INSERT INTO buildings (customer_id, name, address, city, floors_count, units_per_floor, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.customer_id)
    .bind(data.name)
    .bind(data.address)
    .bind(data.city)
    .bind(data.floors_count)
    .bind(data.units_per_floor)
    .bind(data.description)
    .fetch_one(pool)
    .await
    .map_err(AppError::from)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    customer_id: Uuid,
    patch: BuildingPatch,
) -> Res<Option<Building>> {
    sqlx::query_as::<_, Building>(
        r#"
        UPDATE buildings
        SET name            = COALESCE($3, name),
            address         = COALESCE($4, address),
            city            = COALESCE($5, city),
            floors_count    = COALESCE($6, floors_count),
            units_per_floor = COALESCE($7, units_per_floor),
            description     = COALESCE($8, description)
        WHERE id = $1 AND customer_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .bind(patch.name)
    .bind(patch.address)
    .bind(patch.city)
    .bind(patch.floors_count)
    .bind(patch.units_per_floor)
    .bind(patch.description)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

pub async fn count_units(pool: &PgPool, building_id: Uuid) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM units WHERE building_id = $1")
        .bind(building_id)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)
}

pub async fn delete(pool: &PgPool, id: Uuid, customer_id: Uuid) -> Res<()> {
    sqlx::query("DELETE FROM buildings WHERE id = $1 AND customer_id = $2")
        .bind(id)
        .bind(customer_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn stats(pool: &PgPool, building_id: Uuid) -> Res<BuildingStats> {
    sqlx::query_as::<_, BuildingStats>(
        r#"
        SELECT
            COUNT(*) AS total_units,
            COUNT(*) FILTER (WHERE status = 'occupied') AS occupied_units,
            COUNT(*) FILTER (WHERE status = 'available') AS available_units,
            COUNT(*) FILTER (WHERE status = 'maintenance') AS maintenance_units,
            SUM(rent_amount)::bigint AS total_rent,
            AVG(rent_amount)::float8 AS average_rent
        FROM units
        WHERE building_id = $1
        "#,
    )
    .bind(building_id)
    .fetch_one(pool)
    .await
    .map_err(AppError::from)
}
