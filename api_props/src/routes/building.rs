use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, post, put, web};
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::Claims;
use db::dtos::building::{BuildingPatch, NewBuilding};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::building::{CreateBuildingRequest, UpdateBuildingRequest};

#[get("")]
pub async fn list(
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let buildings = db::building::list_for_customer(&pool, claims.account_id).await?;
    Success::ok(buildings)
}

#[get("/{id}")]
pub async fn get_one(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let building = db::building::find_summary(&pool, path.into_inner(), claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Building not found".to_string()))?;
    Success::ok(building)
}

#[get("/{id}/stats")]
pub async fn get_stats(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let id = path.into_inner();
    if !db::building::exists_owned(&pool, id, claims.account_id).await? {
        return Err(AppError::NotFound("Building not found".to_string()));
    }
    let stats = db::building::stats(&pool, id).await?;
    Success::ok(stats)
}

#[post("")]
pub async fn create(
    claims: web::ReqData<Claims>,
    req: web::Json<CreateBuildingRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let req = req.into_inner();
    if req.name.trim().is_empty() || req.address.trim().is_empty() || req.city.trim().is_empty() {
        return Err(AppError::Validation(
            "Name, address and city are required".to_string(),
        ));
    }
    if req.floors_count <= 0 || req.units_per_floor <= 0 {
        return Err(AppError::Validation(
            "Floor and unit counts must be positive".to_string(),
        ));
    }

    let building = db::building::insert(
        &pool,
        NewBuilding {
            customer_id: claims.account_id,
            name: req.name,
            address: req.address,
            city: req.city,
            floors_count: req.floors_count,
            units_per_floor: req.units_per_floor,
            description: req.description,
        },
    )
    .await?;

    Success::created("Building created successfully", building)
}

#[put("/{id}")]
pub async fn update(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    req: web::Json<UpdateBuildingRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let req = req.into_inner();
    let patch = BuildingPatch {
        name: req.name,
        address: req.address,
        city: req.city,
        floors_count: req.floors_count,
        units_per_floor: req.units_per_floor,
        description: req.description,
    };
    if patch.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    let building = db::building::update(&pool, path.into_inner(), claims.account_id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Building not found".to_string()))?;
    Success::ok_message("Building updated successfully", building)
}

/// Deleting a building with units still attached is refused; the caller
/// has to clear them out first.
#[delete("/{id}")]
pub async fn remove(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let id = path.into_inner();
    if !db::building::exists_owned(&pool, id, claims.account_id).await? {
        return Err(AppError::NotFound("Building not found".to_string()));
    }
    if db::building::count_units(&pool, id).await? > 0 {
        return Err(AppError::Validation(
            "Cannot delete a building that still has units".to_string(),
        ));
    }

    db::building::delete(&pool, id, claims.account_id).await?;
    Success::message("Building deleted successfully")
}
