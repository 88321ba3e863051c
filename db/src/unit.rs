use common::error::{AppError, Res};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::unit::{NewUnit, UnitPatch},
    models::unit::{Unit, UnitWithBuilding},
};

pub async fn list_for_customer(
    pool: &PgPool,
    customer_id: Uuid,
    building_id: Option<Uuid>,
) -> Res<Vec<UnitWithBuilding>> {
    sqlx::query_as::<_, UnitWithBuilding>(
        r#"
        SELECT u.*, b.name AS building_name, b.address AS building_address
        FROM units u
        JOIN buildings b ON u.building_id = b.id
        WHERE b.customer_id = $1
          AND ($2::uuid IS NULL OR u.building_id = $2)
        ORDER BY b.name, u.floor_number, u.unit_number
        "#,
    )
    .bind(customer_id)
    .bind(building_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::from)
}

pub async fn find_owned(
    pool: &PgPool,
    id: Uuid,
    customer_id: Uuid,
) -> Res<Option<UnitWithBuilding>> {
    sqlx::query_as::<_, UnitWithBuilding>(
        r#"
        SELECT u.*, b.name AS building_name, b.address AS building_address
        FROM units u
        JOIN buildings b ON u.building_id = b.id
        WHERE u.id = $1 AND b.customer_id = $2
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

pub async fn number_taken(pool: &PgPool, building_id: Uuid, unit_number: &str) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM units WHERE building_id = $1 AND unit_number = $2)",
    )
    .bind(building_id)
    .bind(unit_number)
    .fetch_one(pool)
    .await
    .map_err(AppError::from)
}

pub async fn insert(pool: &PgPool, data: NewUnit) -> Res<Unit> {
    sqlx::query_as::<_, Unit>(
        r#"
        INSERT INTO units
            (building_id, unit_number, floor_number, bedrooms, bathrooms, area, rent_amount, status, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(data.building_id)
    .bind(data.unit_number)
    .bind(data.floor_number)
    .bind(data.bedrooms)
    .bind(data.bathrooms)
    .bind(data.area)
    .bind(data.rent_amount)
    .bind(data.status)
    .bind(data.description)
    .fetch_one(pool)
    .await
    .map_err(AppError::from)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    customer_id: Uuid,
    patch: UnitPatch,
) -> Res<Option<Unit>> {
    sqlx::query_as::<_, Unit>(
        r#"
        UPDATE units u
        SET unit_number  = COALESCE($3, u.unit_number),
            floor_number = COALESCE($4, u.floor_number),
            bedrooms     = COALESCE($5, u.bedrooms),
            bathrooms    = COALESCE($6, u.bathrooms),
            area         = COALESCE($7, u.area),
            rent_amount  = COALESCE($8, u.rent_amount),
            status       = COALESCE($9, u.status),
            description  = COALESCE($10, u.description)
        FROM buildings b
        WHERE u.id = $1 AND b.id = u.building_id AND b.customer_id = $2
        RETURNING u.*
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .bind(patch.unit_number)
    .bind(patch.floor_number)
    .bind(patch.bedrooms)
    .bind(patch.bathrooms)
    .bind(patch.area)
    .bind(patch.rent_amount)
    .bind(patch.status)
    .bind(patch.description)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

pub async fn delete(pool: &PgPool, id: Uuid, customer_id: Uuid) -> Res<()> {
    sqlx::query(
        r#"
        DELETE FROM units u
        USING buildings b
        WHERE u.id = $1 AND b.id = u.building_id AND b.customer_id = $2
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .execute(pool)
    .await?;
    Ok(())
}
