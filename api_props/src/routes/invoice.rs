use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::Utc;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::Claims;
use db::dtos::invoice::{InvoiceFilter, InvoicePatch, NewInvoice};
use db::models::invoice::InvoiceStatus;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::invoice::{CreateInvoiceRequest, InvoiceListQuery, UpdateInvoiceRequest};

#[get("")]
pub async fn list(
    claims: web::ReqData<Claims>,
    query: web::Query<InvoiceListQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let query = query.into_inner();
    let invoices = db::invoice::list_for_customer(
        &pool,
        claims.account_id,
        InvoiceFilter {
            building_id: query.building_id,
            unit_id: query.unit_id,
            status: query.status,
            start_date: query.start_date,
            end_date: query.end_date,
        },
    )
    .await?;
    Success::ok(invoices)
}

#[get("/{id}")]
pub async fn get_one(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let invoice = db::invoice::find_owned(&pool, path.into_inner(), claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;
    Success::ok(invoice)
}

#[post("")]
pub async fn create(
    claims: web::ReqData<Claims>,
    req: web::Json<CreateInvoiceRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let req = req.into_inner();
    if req.service_type.trim().is_empty() {
        return Err(AppError::Validation("Service type is required".to_string()));
    }
    if req.amount <= 0 {
        return Err(AppError::Validation("Amount must be positive".to_string()));
    }

    // The unit must sit inside one of the caller's buildings.
    db::unit::find_owned(&pool, req.unit_id, claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit not found".to_string()))?;

    let invoice = db::invoice::insert(
        &pool,
        NewInvoice {
            unit_id: req.unit_id,
            service_type: req.service_type,
            amount: req.amount,
            issue_date: req.issue_date.unwrap_or_else(Utc::now),
            due_date: req.due_date,
            description: req.description,
            status: req.status.unwrap_or(InvoiceStatus::Unpaid),
        },
    )
    .await?;

    Success::created("Invoice created successfully", invoice)
}

#[put("/{id}")]
pub async fn update(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    req: web::Json<UpdateInvoiceRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let req = req.into_inner();
    let patch = InvoicePatch {
        service_type: req.service_type,
        amount: req.amount,
        issue_date: req.issue_date,
        due_date: req.due_date,
        description: req.description,
        status: req.status,
    };
    if patch.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    let invoice = db::invoice::update(&pool, path.into_inner(), claims.account_id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;
    Success::ok_message("Invoice updated successfully", invoice)
}

#[patch("/{id}/pay")]
pub async fn pay(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let invoice = db::invoice::mark_paid(&pool, path.into_inner(), claims.account_id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;
    Success::ok_message("Invoice marked as paid", invoice)
}

#[delete("/{id}")]
pub async fn remove(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let id = path.into_inner();
    db::invoice::find_owned(&pool, id, claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

    db::invoice::delete(&pool, id, claims.account_id).await?;
    Success::message("Invoice deleted successfully")
}
