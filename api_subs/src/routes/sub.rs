use std::sync::Arc;

use actix_web::{HttpResponse, get, patch, post, web};
use chrono::Utc;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::Claims;
use common::role::Role;
use db::dtos::subscription::{NewSubscription, SubscriptionFilter};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::sub::{CreateRequest, ListQuery, RenewRequest};
use crate::models::plan::{self, CATALOG};

#[get("/plans")]
pub async fn get_plans() -> Res<HttpResponse> {
    Success::ok(&CATALOG[..])
}

#[get("/my")]
pub async fn get_my(
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let subscriptions = db::subscription::list_for_customer(&pool, claims.account_id).await?;
    Success::ok(subscriptions)
}

pub async fn get_all(
    query: web::Query<ListQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let query = query.into_inner();
    let subscriptions = db::subscription::list_all(
        &pool,
        SubscriptionFilter {
            status: query.status,
            plan: query.plan,
        },
    )
    .await?;
    Success::ok(subscriptions)
}

/// Admin-created subscription with explicit dates. Any active subscription
/// the customer already has gets expired in the same transaction.
pub async fn create(
    req: web::Json<CreateRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let req = req.into_inner();
    if req.end_date <= req.start_date {
        return Err(AppError::Validation(
            "End date must be after start date".to_string(),
        ));
    }
    if req.amount <= 0 {
        return Err(AppError::Validation("Amount must be positive".to_string()));
    }

    db::account::find_by_id(&pool, req.customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    let created = db::subscription::replace_active(
        &pool,
        NewSubscription {
            customer_id: req.customer_id,
            plan: req.plan,
            amount: req.amount,
            start_date: req.start_date,
            end_date: req.end_date,
            auto_renew: req.auto_renew,
        },
    )
    .await?;

    Success::created("Subscription created successfully", created)
}

/// A customer may only touch their own subscriptions; a foreign id looks
/// like a missing one. Admins can act on any.
async fn find_for_actor(
    pool: &PgPool,
    id: Uuid,
    claims: &Claims,
) -> Res<db::models::subscription::Subscription> {
    let found = if claims.role == Role::Admin {
        db::subscription::find_by_id(pool, id).await?
    } else {
        db::subscription::find_owned(pool, id, claims.account_id).await?
    };
    found.ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))
}

/// Starts a fresh term today. The plan, amount and billing period default
/// to the old subscription's values; enterprise terms always run a year.
#[post("/{id}/renew")]
pub async fn renew(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    req: web::Json<RenewRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let req = req.into_inner();
    let old = find_for_actor(&pool, path.into_inner(), &claims).await?;

    let plan_kind = req.plan.unwrap_or(old.plan);
    let amount = req.amount.unwrap_or(old.amount);
    let period = req.duration.unwrap_or_else(|| plan::default_period(plan_kind));

    let start_date = Utc::now();
    let end_date = plan::term_end(start_date, plan_kind, period)
        .ok_or_else(|| AppError::Internal("Subscription end date out of range".to_string()))?;

    let created = db::subscription::replace_active(
        &pool,
        NewSubscription {
            customer_id: old.customer_id,
            plan: plan_kind,
            amount,
            start_date,
            end_date,
            auto_renew: old.auto_renew,
        },
    )
    .await?;

    log::info!(
        "Subscription renewed for customer {} ({:?} until {})",
        created.customer_id,
        created.plan,
        created.end_date
    );
    Success::ok_message("Subscription renewed successfully", created)
}

#[patch("/{id}/cancel")]
pub async fn cancel(
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<HttpResponse> {
    let subscription = find_for_actor(&pool, path.into_inner(), &claims).await?;
    db::subscription::cancel(&pool, subscription.id).await?;
    Success::message("Subscription cancelled successfully")
}
