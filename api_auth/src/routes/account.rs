use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, post, put, web};
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::Claims;
use common::password;
use db::dtos::account::AccountPatch;
use sqlx::PgPool;

use crate::dtos::auth::{ChangePasswordRequest, UpdateProfileRequest};

#[get("/me")]
pub async fn get_me(
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let account = db::account::find_by_id(&pool, claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;
    Success::ok(account)
}

/// Logout is a no-op: tokens are stateless and there is no revocation
/// list, so the client just discards its copy. Known weakness, preserved.
#[post("/logout")]
pub async fn post_logout() -> Res<HttpResponse> {
    Success::message("Logged out successfully")
}

#[put("/update-profile")]
pub async fn put_update_profile(
    claims: web::ReqData<Claims>,
    req: web::Json<UpdateProfileRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    let patch = AccountPatch {
        name: req.name,
        phone: req.phone,
        address: req.address,
    };
    if patch.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    let account = db::account::update_profile(&pool, claims.account_id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;
    Success::ok_message("Profile updated successfully", account)
}

/// Changing the password does not invalidate tokens already issued; they
/// stay valid until their TTL runs out.
#[put("/change-password")]
pub async fn put_change_password(
    claims: web::ReqData<Claims>,
    req: web::Json<ChangePasswordRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(AppError::Validation(
            "Current and new passwords are required".to_string(),
        ));
    }

    let account = db::account::find_by_id(&pool, claims.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    if !password::verify(&req.current_password, &account.password_hash) {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = password::hash(&req.new_password)?;
    db::account::update_password(&pool, account.id, &new_hash).await?;

    Success::message("Password changed successfully")
}
