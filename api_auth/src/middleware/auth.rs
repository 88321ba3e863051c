use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpMessage, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};
use sqlx::PgPool;

use common::{env_config::Config, error::AppError, jwt};

/// Resolves the request's bearer token to a live, active account.
///
/// The account is re-fetched from the database on every request with the
/// active-status requirement folded into the lookup. Tokens are never
/// revoked server-side, so this re-fetch is the only thing stopping a
/// deactivated account from acting on a still-valid token.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
}

/// Pulls the token out of a well-formed `Authorization: Bearer <token>`
/// header, or `None` for a missing/malformed one.
pub fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = bearer_token(&req);
        let config = req.app_data::<web::Data<Arc<Config>>>().cloned();
        let pool = req.app_data::<web::Data<Arc<PgPool>>>().cloned();
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let (Some(config), Some(pool)) = (config, pool) else {
                let response = AppError::Internal("Application state not configured".to_string())
                    .to_http_response();
                return Ok(req.into_response(response));
            };

            let Some(token) = token else {
                let response =
                    AppError::Unauthorized("No authorization token provided".to_string())
                        .to_http_response();
                return Ok(req.into_response(response));
            };

            let claims = match jwt::validate(&token, &config.jwt_config.secret) {
                Ok(claims) => claims,
                Err(_) => {
                    let response =
                        AppError::Unauthorized("Invalid or expired token".to_string())
                            .to_http_response();
                    return Ok(req.into_response(response));
                }
            };

            // Re-fetch by the embedded id, requiring status = active in the
            // same lookup; covers accounts deactivated after issuance.
            let account = match db::account::find_active_by_id(&pool, claims.account_id).await {
                Ok(Some(account)) => account,
                Ok(None) => {
                    let response =
                        AppError::Unauthorized("Account not found or inactive".to_string())
                            .to_http_response();
                    return Ok(req.into_response(response));
                }
                Err(err) => {
                    return Ok(req.into_response(err.to_http_response()));
                }
            };

            req.extensions_mut().insert(claims);
            req.extensions_mut().insert(account);
            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{self, TestRequest};
    use actix_web::{App, HttpResponse, http::StatusCode};
    use common::env_config::{JwtConfig, SmtpConfig};
    use common::jwt::ClaimsSpec;
    use common::role::Role;
    use uuid::Uuid;

    #[test]
    fn bearer_token_requires_the_scheme_prefix() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_srv_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc"))
            .to_srv_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default().to_srv_request();
        assert_eq!(bearer_token(&req), None);
    }

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            environment: "development".to_string(),
            database_url: "postgres://localhost/unused".to_string(),
            jwt_config: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                refresh_expiration_hours: 2,
            },
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            num_workers: 1,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            console_logging_enabled: false,
            rate_limit_window_secs: 60,
            rate_limit_max_requests: 100,
            auth_rate_limit_max_requests: 5,
            smtp: SmtpConfig {
                enabled: false,
                host: String::new(),
                port: 587,
                username: String::new(),
                password: String::new(),
                from: String::new(),
            },
        })
    }

    // Lazy pool: all the rejection paths below fire before any query runs.
    fn unused_pool() -> Arc<PgPool> {
        Arc::new(PgPool::connect_lazy("postgres://localhost/unused").unwrap())
    }

    async fn guarded_status(authorization: Option<String>) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .app_data(web::Data::new(unused_pool()))
                .service(
                    web::resource("/protected")
                        .wrap(AuthMiddleware)
                        .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
                ),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/protected");
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }
        test::call_service(&app, req.to_request()).await.status()
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        assert_eq!(guarded_status(None).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn garbage_token_is_unauthorized() {
        assert_eq!(
            guarded_status(Some("Bearer not.a.jwt".to_string())).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn expired_token_is_unauthorized() {
        // mint a token two hours past its expiry, signed with the same secret
        let stale_config = JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: -2,
            refresh_expiration_hours: 1,
        };
        let token = jwt::generate(
            ClaimsSpec {
                account_id: Uuid::new_v4(),
                email: "a@x.com".to_string(),
                role: Role::Manager,
                has_subscription: false,
            },
            &stale_config,
        )
        .unwrap();

        assert_eq!(
            guarded_status(Some(format!("Bearer {token}"))).await,
            StatusCode::UNAUTHORIZED
        );
    }
}
