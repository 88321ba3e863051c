use chrono::{DateTime, Utc};
use common::error::{AppError, Res};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::invoice::{InvoiceFilter, InvoicePatch, NewInvoice},
    models::invoice::{InvoiceWithContext, OverdueInvoice, ServiceInvoice},
};

pub async fn list_for_customer(
    pool: &PgPool,
    customer_id: Uuid,
    filter: InvoiceFilter,
) -> Res<Vec<InvoiceWithContext>> {
    sqlx::query_as::<_, InvoiceWithContext>(
        r#"
        SELECT si.*, u.unit_number, u.floor_number, b.name AS building_name
        FROM service_invoices si
        JOIN units u ON si.unit_id = u.id
        JOIN buildings b ON u.building_id = b.id
        WHERE b.customer_id = $1
          AND ($2::uuid IS NULL OR u.building_id = $2)
          AND ($3::uuid IS NULL OR si.unit_id = $3)
          AND ($4::invoice_status IS NULL OR si.status = $4)
          AND ($5::timestamptz IS NULL OR si.issue_date >= $5)
          AND ($6::timestamptz IS NULL OR si.issue_date <= $6)
        ORDER BY si.issue_date DESC
        "#,
    )
    .bind(customer_id)
    .bind(filter.building_id)
    .bind(filter.unit_id)
    .bind(filter.status)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_all(pool)
    .await
    .map_err(AppError::from)
}

pub async fn find_owned(
    pool: &PgPool,
    id: Uuid,
    customer_id: Uuid,
) -> Res<Option<InvoiceWithContext>> {
    sqlx::query_as::<_, InvoiceWithContext>(
        r#"
        SELECT si.*, u.unit_number, u.floor_number, b.name AS building_name
        FROM service_invoices si
        JOIN units u ON si.unit_id = u.id
        JOIN buildings b ON u.building_id = b.id
        WHERE si.id = $1 AND b.customer_id = $2
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

pub async fn insert(pool: &PgPool, data: NewInvoice) -> Res<ServiceInvoice> {
    sqlx::query_as::<_, ServiceInvoice>(
        r#"
        INSERT INTO service_invoices
            (unit_id, service_type, amount, issue_date, due_date, description, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.unit_id)
    .bind(data.service_type)
    .bind(data.amount)
    .bind(data.issue_date)
    .bind(data.due_date)
    .bind(data.description)
    .bind(data.status)
    .fetch_one(pool)
    .await
    .map_err(AppError::from)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    customer_id: Uuid,
    patch: InvoicePatch,
) -> Res<Option<ServiceInvoice>> {
    sqlx::query_as::<_, ServiceInvoice>(
        r#"
        UPDATE service_invoices si
        SET service_type = COALESCE($3, si.service_type),
            amount       = COALESCE($4, si.amount),
            issue_date   = COALESCE($5, si.issue_date),
            due_date     = COALESCE($6, si.due_date),
            description  = COALESCE($7, si.description),
            status       = COALESCE($8, si.status)
        FROM units u
        JOIN buildings b ON u.building_id = b.id
        WHERE si.id = $1 AND u.id = si.unit_id AND b.customer_id = $2
        RETURNING si.*
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .bind(patch.service_type)
    .bind(patch.amount)
    .bind(patch.issue_date)
    .bind(patch.due_date)
    .bind(patch.description)
    .bind(patch.status)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

pub async fn mark_paid(
    pool: &PgPool,
    id: Uuid,
    customer_id: Uuid,
    now: DateTime<Utc>,
) -> Res<Option<ServiceInvoice>> {
    sqlx::query_as::<_, ServiceInvoice>(
        r#"
        UPDATE service_invoices si
        SET status = 'paid', paid_date = $3
        FROM units u
        JOIN buildings b ON u.building_id = b.id
        WHERE si.id = $1 AND u.id = si.unit_id AND b.customer_id = $2
        RETURNING si.*
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .bind(now)
    .fetch_optional(pool)
    .await
    .map_err(AppError::from)
}

pub async fn delete(pool: &PgPool, id: Uuid, customer_id: Uuid) -> Res<()> {
    sqlx::query(
        r#"
        DELETE FROM service_invoices si
        USING units u, buildings b
        WHERE si.id = $1 AND u.id = si.unit_id AND b.id = u.building_id AND b.customer_id = $2
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Unpaid invoices past due that have not triggered a reminder, joined up
/// the ownership chain to the customer's contact details.
pub async fn overdue_unsent(pool: &PgPool, now: DateTime<Utc>) -> Res<Vec<OverdueInvoice>> {
    sqlx::query_as::<_, OverdueInvoice>(
        r#"
        SELECT si.id, si.service_type, si.amount, si.due_date,
               u.unit_number, b.name AS building_name,
               a.name AS customer_name, a.email AS customer_email
        FROM service_invoices si
        JOIN units u ON si.unit_id = u.id
        JOIN buildings b ON u.building_id = b.id
        JOIN accounts a ON b.customer_id = a.id
        WHERE si.status = 'unpaid'
          AND si.due_date IS NOT NULL
          AND si.due_date < $1
          AND si.reminder_sent = FALSE
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(AppError::from)
}

pub async fn mark_reminder_sent(pool: &PgPool, id: Uuid) -> Res<()> {
    sqlx::query("UPDATE service_invoices SET reminder_sent = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
