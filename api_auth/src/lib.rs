use actix_web::web;
use limiter::middleware::client::ClientRateLimiter;

pub mod middleware {
    pub mod auth;
    pub mod role;
}

pub mod routes {
    pub mod account;
    pub mod auth;
}

mod services {
    pub(crate) mod auth;
}

mod dtos {
    pub(crate) mod auth;
}

pub use middleware::auth::AuthMiddleware;
pub use middleware::role::RoleGuard;

/// Auth endpoints under /auth. The public ones (register/login/refresh)
/// sit behind the strict rate-limit tier; everything else requires a
/// live bearer token.
pub fn mount_auth(auth_limiter: ClientRateLimiter) -> actix_web::Scope {
    web::scope("/auth")
        .service(
            web::resource("/register")
                .wrap(auth_limiter.clone())
                .route(web::post().to(routes::auth::register)),
        )
        .service(
            web::resource("/login")
                .wrap(auth_limiter.clone())
                .route(web::post().to(routes::auth::login)),
        )
        .service(
            web::resource("/refresh-token")
                .wrap(auth_limiter)
                .route(web::post().to(routes::auth::refresh_token)),
        )
        .service(
            web::scope("")
                .wrap(AuthMiddleware)
                .service(routes::account::get_me)
                .service(routes::account::post_logout)
                .service(routes::account::put_update_profile)
                .service(routes::account::put_change_password),
        )
}
