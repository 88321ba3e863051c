use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::error::AppError;
use governor::{
    Quota, RateLimiter,
    clock::QuantaClock,
    state::keyed::DashMapStateStore,
};
use std::{future::Future, num::NonZeroU32, pin::Pin, rc::Rc, sync::Arc, time::Duration};

type ClientStateStore = DashMapStateStore<String>;

/// Per-client rate limiter keyed by remote IP. A full window's worth of
/// requests is allowed as burst and refills evenly over the window.
pub struct ClientRateLimiter {
    limiter: Arc<RateLimiter<String, ClientStateStore, QuantaClock>>,
}

impl Clone for ClientRateLimiter {
    fn clone(&self) -> Self {
        Self {
            limiter: self.limiter.clone(),
        }
    }
}

impl ClientRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let max = NonZeroU32::new(max_requests).expect("rate limit must be non-zero");
        let period = Duration::from_secs_f64(window.as_secs_f64() / f64::from(max_requests));
        let quota = Quota::with_period(period)
            .expect("rate limit window must be non-zero")
            .allow_burst(max);
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ClientRateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = ClientRateLimiterService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(ClientRateLimiterService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct ClientRateLimiterService<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter<String, ClientStateStore, QuantaClock>>,
}

impl<S, B> Service<ServiceRequest> for ClientRateLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = req
            .connection_info()
            .realip_remote_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let srv = Rc::clone(&self.service);
        let limiter = self.limiter.clone();

        Box::pin(async move {
            if limiter.check_key(&client).is_ok() {
                srv.call(req).await.map(|res| res.map_into_boxed_body())
            } else {
                log::warn!("Rate limit exceeded for client {}", client);
                Ok(req.error_response(AppError::TooManyRequests(
                    "Too many requests. Please try again later".to_string(),
                )))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    use super::*;

    #[actix_web::test]
    async fn requests_past_the_limit_get_429() {
        let app = test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(ClientRateLimiter::new(2, Duration::from_secs(60)))
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::get().uri("/limited").to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }
        let req = test::TestRequest::get().uri("/limited").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[actix_web::test]
    async fn clones_share_one_budget() {
        let limiter = ClientRateLimiter::new(1, Duration::from_secs(60));
        let app = test::init_service(
            App::new()
                .service(
                    web::resource("/a")
                        .wrap(limiter.clone())
                        .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
                )
                .service(
                    web::resource("/b")
                        .wrap(limiter)
                        .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/a").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::get().uri("/b").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
