use common::error::{AppError, Res};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::account::{AccountPatch, NewAccount},
    models::account::Account,
};

pub async fn exists_by_email(pool: &PgPool, email: &str) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Res<Option<Account>> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Res<Option<Account>> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)
}

/// Lookup used by the auth middleware: the active-status requirement lives
/// in the query itself, so a deactivated account yields zero rows even while
/// its token is still within TTL.
pub async fn find_active_by_id(pool: &PgPool, id: Uuid) -> Res<Option<Account>> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1 AND status = 'active'")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)
}

pub async fn insert(pool: &PgPool, data: NewAccount) -> Res<Account> {
    sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (name, email, password_hash, phone, address, role, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'active')
        RETURNING *
        "#,
    )
    .bind(data.name)
    .bind(data.email)
    .bind(data.password_hash)
    .bind(data.phone)
    .bind(data.address)
    .bind(data.role)
    .fetch_one(pool)
    .await
    .map_err(AppError::from)
}

pub async fn update_profile(pool: &PgPool, id: Uuid, patch: AccountPatch) -> Res<Option<Account>> {
    sqlx::query_as::<_, Account>(
        r#"
        UPDATE accounts
        SET name    = COALESCE($2, name),
            phone   = COALESCE($3, phone),
            address = COALESCE($4, address)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(patch.name)
    .bind(patch.phone)
    .bind(patch.address)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

pub async fn update_password(pool: &PgPool, id: Uuid, password_hash: &str) -> Res<()> {
    sqlx::query("UPDATE accounts SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}
