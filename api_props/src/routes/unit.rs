use std::sync::Arc;

use actix_web::{HttpResponse, delete, get, post, put, web};
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::Claims;
use db::dtos::unit::{NewUnit, UnitPatch};
use db::models::unit::UnitStatus;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::unit::{CreateUnitRequest, UnitListQuery, UpdateUnitRequest};

#[get("")]
pub async fn list(
    claims: web::ReqData<Claims>,
    query: web::Query<UnitListQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let units =
        db::unit::list_for_customer(&pool, claims.account_id, query.building_id).await?;
    Success::ok(units)
}

#[get("/{id}")]
pub async fn get_one(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let unit = db::unit::find_owned(&pool, path.into_inner(), claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit not found".to_string()))?;
    Success::ok(unit)
}

#[post("")]
pub async fn create(
    claims: web::ReqData<Claims>,
    req: web::Json<CreateUnitRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let req = req.into_inner();
    if req.unit_number.trim().is_empty() {
        return Err(AppError::Validation("Unit number is required".to_string()));
    }

    // The building must belong to the caller; a foreign one looks absent.
    if !db::building::exists_owned(&pool, req.building_id, claims.account_id).await? {
        return Err(AppError::NotFound("Building not found".to_string()));
    }
    if db::unit::number_taken(&pool, req.building_id, &req.unit_number).await? {
        return Err(AppError::Conflict(
            "Unit number already exists in this building".to_string(),
        ));
    }

    let unit = db::unit::insert(
        &pool,
        NewUnit {
            building_id: req.building_id,
            unit_number: req.unit_number,
            floor_number: req.floor_number,
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            area: req.area,
            rent_amount: req.rent_amount,
            status: req.status.unwrap_or(UnitStatus::Available),
            description: req.description,
        },
    )
    .await?;

    Success::created("Unit created successfully", unit)
}

#[put("/{id}")]
pub async fn update(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    req: web::Json<UpdateUnitRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let id = path.into_inner();
    let req = req.into_inner();
    let patch = UnitPatch {
        unit_number: req.unit_number,
        floor_number: req.floor_number,
        bedrooms: req.bedrooms,
        bathrooms: req.bathrooms,
        area: req.area,
        rent_amount: req.rent_amount,
        status: req.status,
        description: req.description,
    };
    if patch.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    let existing = db::unit::find_owned(&pool, id, claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit not found".to_string()))?;

    if let Some(number) = &patch.unit_number {
        if number != &existing.unit_number
            && db::unit::number_taken(&pool, existing.building_id, number).await?
        {
            return Err(AppError::Conflict(
                "Unit number already exists in this building".to_string(),
            ));
        }
    }

    let unit = db::unit::update(&pool, id, claims.account_id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit not found".to_string()))?;
    Success::ok_message("Unit updated successfully", unit)
}

/// Occupancy history of a unit, most recent move-in first.
#[get("/{id}/tenants")]
pub async fn tenants_history(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let id = path.into_inner();
    db::unit::find_owned(&pool, id, claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit not found".to_string()))?;

    let tenants = db::tenant::list_for_unit(&pool, id).await?;
    Success::ok(tenants)
}

/// Deleting a unit with tenant records attached is refused to keep the
/// occupancy history intact.
#[delete("/{id}")]
pub async fn remove(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let id = path.into_inner();
    db::unit::find_owned(&pool, id, claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unit not found".to_string()))?;

    if db::tenant::count_for_unit(&pool, id).await? > 0 {
        return Err(AppError::Validation(
            "Cannot delete a unit that still has tenants".to_string(),
        ));
    }

    db::unit::delete(&pool, id, claims.account_id).await?;
    Success::message("Unit deleted successfully")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, HttpMessage, dev::Service, http::StatusCode, test, web};
    use common::jwt::Claims;
    use common::role::Role;
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::mount_units;

    // Route-resolution only. The lazy pool never connects, so handlers that
    // reach the database come back as 500 here rather than running.
    async fn dispatch(path: &str) -> StatusCode {
        let pool = Arc::new(PgPool::connect_lazy("postgres://localhost/unused").unwrap());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .wrap_fn(|req, srv| {
                    req.extensions_mut().insert(Claims {
                        account_id: Uuid::new_v4(),
                        email: "a@x.com".to_string(),
                        role: Role::Manager,
                        has_subscription: true,
                        exp: 4102444800,
                    });
                    srv.call(req)
                })
                .service(mount_units()),
        )
        .await;

        let req = test::TestRequest::get().uri(path).to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn tenants_history_route_is_mounted() {
        let id = Uuid::new_v4();
        let status = dispatch(&format!("/units/{id}/tenants")).await;
        assert_ne!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unknown_unit_subresource_is_not_mounted() {
        let id = Uuid::new_v4();
        let status = dispatch(&format!("/units/{id}/leases")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
