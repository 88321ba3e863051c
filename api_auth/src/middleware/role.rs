use std::{future::Future, pin::Pin, rc::Rc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};

use common::{error::AppError, jwt::Claims, role::Role};

/// Restricts a route to a fixed allow-list of roles. Must run after
/// `AuthMiddleware`, which populates the request's claims.
pub struct RoleGuard {
    allowed: Rc<Vec<Role>>,
}

impl RoleGuard {
    pub fn allow(roles: &[Role]) -> Self {
        RoleGuard {
            allowed: Rc::new(roles.to_vec()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = RoleGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RoleGuardService {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        })
    }
}

pub struct RoleGuardService<S> {
    service: Rc<S>,
    allowed: Rc<Vec<Role>>,
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Unreachable given middleware ordering, kept as a hard stop if a
        // route is ever mounted without AuthMiddleware in front.
        let role = req.extensions().get::<Claims>().map(|claims| claims.role);
        let allowed = self.allowed.clone();
        let srv = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(role) = role else {
                let response = AppError::Unauthorized("Login required".to_string())
                    .to_http_response();
                return Ok(req.into_response(response));
            };

            if !role.is_allowed(&allowed) {
                let response = AppError::Forbidden(
                    "You do not have permission to access this resource".to_string(),
                )
                .to_http_response();
                return Ok(req.into_response(response));
            }

            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{
        App, HttpMessage, HttpResponse, dev::Service, http::StatusCode, test, web,
    };
    use common::jwt::Claims;
    use common::role::Role;
    use uuid::Uuid;

    use super::RoleGuard;

    /// Runs a request through a RoleGuard-protected resource, optionally
    /// planting claims the way AuthMiddleware would.
    async fn status_with_role(planted: Option<Role>) -> StatusCode {
        let app = test::init_service(
            App::new().service(
                web::resource("/admin-only")
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() }))
                    .wrap(RoleGuard::allow(&[Role::Admin]))
                    .wrap_fn(move |req, srv| {
                        if let Some(role) = planted {
                            req.extensions_mut().insert(Claims {
                                account_id: Uuid::new_v4(),
                                email: "a@x.com".to_string(),
                                role,
                                has_subscription: true,
                                exp: 4102444800,
                            });
                        }
                        srv.call(req)
                    }),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/admin-only").to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn admin_passes() {
        assert_eq!(status_with_role(Some(Role::Admin)).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn manager_is_forbidden_on_admin_route() {
        assert_eq!(
            status_with_role(Some(Role::Manager)).await,
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn missing_claims_is_unauthorized() {
        assert_eq!(status_with_role(None).await, StatusCode::UNAUTHORIZED);
    }
}
