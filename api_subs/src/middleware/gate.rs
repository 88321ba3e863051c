use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpMessage, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use chrono::Utc;
use futures::future::{Ready, ok};
use sqlx::PgPool;

use common::{error::AppError, jwt::Claims};

/// Rejects requests from accounts without a live subscription.
///
/// Runs after AuthMiddleware and reads the claims it planted. The
/// subscription row is re-read on every request so that an expiry or an
/// admin cancellation takes effect immediately, regardless of the
/// `has_subscription` claim baked into the token at login.
pub struct SubscriptionGate;

impl<S, B> Transform<S, ServiceRequest> for SubscriptionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = SubscriptionGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SubscriptionGateService {
            service: Arc::new(service),
        })
    }
}

pub struct SubscriptionGateService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for SubscriptionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let pool = req.app_data::<web::Data<Arc<PgPool>>>().cloned();
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let Some(pool) = pool else {
                let response = AppError::Internal("Application state not configured".to_string())
                    .to_http_response();
                return Ok(req.into_response(response));
            };

            let Some(claims) = claims else {
                let response = AppError::Unauthorized("Login required".to_string())
                    .to_http_response();
                return Ok(req.into_response(response));
            };

            let current =
                match db::subscription::find_current_active(&pool, claims.account_id, Utc::now())
                    .await
                {
                    Ok(current) => current,
                    Err(err) => return Ok(req.into_response(err.to_http_response())),
                };

            let Some(subscription) = current else {
                return Ok(req.into_response(AppError::SubscriptionExpired.to_http_response()));
            };

            req.extensions_mut().insert(subscription);
            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test};

    // Lazy pool: no connection is made unless a query runs, and the
    // no-claims path rejects before any query.
    fn unused_pool() -> Arc<PgPool> {
        Arc::new(PgPool::connect_lazy("postgres://localhost/unused").unwrap())
    }

    #[actix_web::test]
    async fn unauthenticated_request_is_rejected_before_any_lookup() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(unused_pool()))
                .service(
                    web::resource("/gated")
                        .wrap(SubscriptionGate)
                        .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/gated").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_pool_is_a_server_error() {
        let app = test::init_service(
            App::new().service(
                web::resource("/gated")
                    .wrap(SubscriptionGate)
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/gated").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
