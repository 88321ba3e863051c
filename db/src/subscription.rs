use chrono::{DateTime, Utc};
use common::error::{AppError, Res};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::subscription::{NewSubscription, SubscriptionFilter},
    models::subscription::{ExpiringSubscription, Subscription, SubscriptionWithCustomer},
};

/// The subscription gate's read: newest active subscription whose end_date
/// is strictly after `now`. A subscription ending exactly at `now` is
/// already expired.
pub async fn find_current_active(
    pool: &PgPool,
    customer_id: Uuid,
    now: DateTime<Utc>,
) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>(
        r#"
        SELECT * FROM subscriptions
        WHERE customer_id = $1 AND status = 'active' AND end_date > $2
        ORDER BY end_date DESC
        LIMIT 1
        "#,
    )
    .bind(customer_id)
    .bind(now)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

pub async fn list_for_customer(pool: &PgPool, customer_id: Uuid) -> Res<Vec<Subscription>> {
    sqlx::query_as::<_, Subscription>(
        "SELECT * FROM subscriptions WHERE customer_id = $1 ORDER BY end_date DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::from)
}

pub async fn list_all(
    pool: &PgPool,
    filter: SubscriptionFilter,
) -> Res<Vec<SubscriptionWithCustomer>> {
    sqlx::query_as::<_, SubscriptionWithCustomer>(
        r#"
        SELECT s.*, a.name AS customer_name, a.email AS customer_email
        FROM subscriptions s
        JOIN accounts a ON s.customer_id = a.id
        WHERE ($1::subscription_status IS NULL OR s.status = $1)
          AND ($2::plan_kind IS NULL OR s.plan = $2)
        ORDER BY s.end_date DESC
        "#,
    )
    .bind(filter.status)
    .bind(filter.plan)
    .fetch_all(pool)
    .await
    .map_err(AppError::from)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::from)
}

pub async fn find_owned(pool: &PgPool, id: Uuid, customer_id: Uuid) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>(
        "SELECT * FROM subscriptions WHERE id = $1 AND customer_id = $2",
    )
    .bind(id)
    .bind(customer_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

/// Expires any currently active subscriptions for the customer and inserts
/// the replacement, all in one transaction. Keeps the "at most one active
/// subscription per account" invariant under concurrent renewals.
pub async fn replace_active(pool: &PgPool, data: NewSubscription) -> Res<Subscription> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE subscriptions SET status = 'expired' WHERE customer_id = $1 AND status = 'active'",
    )
    .bind(data.customer_id)
    .execute(&mut *tx)
    .await?;

    let created = sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (customer_id, plan, amount, start_date, end_date, status, auto_renew)
        VALUES ($1, $2, $3, $4, $5, 'active', $6)
        RETURNING *
        "#,
    )
    .bind(data.customer_id)
    .bind(data.plan)
    .bind(data.amount)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.auto_renew)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(created)
}

pub async fn cancel(pool: &PgPool, id: Uuid) -> Res<()> {
    sqlx::query(
        "UPDATE subscriptions SET status = 'cancelled', auto_renew = FALSE WHERE id = $1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Active subscriptions ending within the warning window that have not been
/// notified yet, joined with the owner's contact details.
pub async fn expiring_unnotified(
    pool: &PgPool,
    now: DateTime<Utc>,
    window_days: i64,
) -> Res<Vec<ExpiringSubscription>> {
    sqlx::query_as::<_, ExpiringSubscription>(
        r#"
        SELECT s.id, s.customer_id, s.plan, s.end_date,
               a.name AS customer_name, a.email AS customer_email
        FROM subscriptions s
        JOIN accounts a ON s.customer_id = a.id
        WHERE s.status = 'active'
          AND s.end_date > $1
          AND s.end_date <= $1 + make_interval(days => $2::int)
          AND s.notified_7days = FALSE
        "#,
    )
    .bind(now)
    .bind(window_days as i32)
    .fetch_all(pool)
    .await
    .map_err(AppError::from)
}

/// One-shot flag: the expiry warning fires once per subscription lifetime.
pub async fn mark_notified(pool: &PgPool, id: Uuid) -> Res<()> {
    sqlx::query("UPDATE subscriptions SET notified_7days = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Bulk transition of lapsed rows, for reporting consistency. The gate's own
/// end_date check already rejects lapsed-but-unswept subscriptions.
pub async fn sweep_expired(pool: &PgPool, now: DateTime<Utc>) -> Res<u64> {
    let result = sqlx::query(
        "UPDATE subscriptions SET status = 'expired' WHERE status = 'active' AND end_date < $1",
    )
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
