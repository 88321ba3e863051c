use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::{self, ClaimsSpec};
use common::{password, role::Role};
use db::dtos::account::NewAccount;
use sqlx::PgPool;

use crate::dtos::auth::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenResponse};
use crate::services;

/// Registers a new property-manager account and returns a token pair.
/// Duplicate email surfaces as a 400.
pub async fn register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<HttpResponse> {
    let req = req.into_inner();
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Name, email and password are required".to_string(),
        ));
    }

    if db::account::exists_by_email(&pool, &req.email).await? {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }

    let password_hash = password::hash(&req.password)?;
    let account = db::account::insert(
        &pool,
        NewAccount {
            name: req.name,
            email: req.email,
            password_hash,
            phone: req.phone,
            address: req.address,
            role: Role::Manager,
        },
    )
    .await?;

    // A brand-new account has no subscription yet.
    let (token, refresh_token) = services::auth::issue_tokens(&account, false, &config)?;

    Success::created(
        "Account created successfully",
        AuthResponse {
            account,
            has_subscription: false,
            token,
            refresh_token,
        },
    )
}

/// Authenticates with email/password and returns a token pair plus the
/// subscription flag the dashboard uses to route to billing.
pub async fn login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let login_data = login_data.into_inner();
    if login_data.email.trim().is_empty() || login_data.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let account =
        services::auth::authenticate(&pool, &login_data.email, &login_data.password).await?;

    let has_subscription =
        db::subscription::find_current_active(&pool, account.id, Utc::now())
            .await?
            .is_some();

    let (token, refresh_token) = services::auth::issue_tokens(&account, has_subscription, &config)?;

    Success::ok_message(
        "Logged in successfully",
        AuthResponse {
            account,
            has_subscription,
            token,
            refresh_token,
        },
    )
}

/// Re-issues an access token from a valid refresh token. No server-side
/// state: any unexpired token signed with our secret re-derives a fresh
/// access token carrying the same claims.
pub async fn refresh_token(
    req: web::Json<RefreshRequest>,
    config: web::Data<Arc<Config>>,
) -> Res<HttpResponse> {
    let claims = jwt::validate(&req.refresh_token, &config.jwt_config.secret)
        .map_err(|_| AppError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    let token = jwt::generate(
        ClaimsSpec {
            account_id: claims.account_id,
            email: claims.email,
            role: claims.role,
            has_subscription: claims.has_subscription,
        },
        &config.jwt_config,
    )?;

    Success::ok(TokenResponse { token })
}
