use actix_web::web;
use api_auth::RoleGuard;
use common::role::Role;

pub mod middleware {
    pub mod gate;
}

pub mod models {
    pub mod plan;
}

pub mod routes {
    pub mod sub;
}

mod dtos {
    pub(crate) mod sub;
}

pub use middleware::gate::SubscriptionGate;

/// Subscription endpoints under /subscriptions. The whole scope assumes
/// AuthMiddleware has already run; the admin-only resources carry their
/// own RoleGuard. Deliberately not behind the subscription gate, otherwise
/// a lapsed customer could never renew.
pub fn mount_subs() -> actix_web::Scope {
    web::scope("/subscriptions")
        .service(routes::sub::get_plans)
        .service(routes::sub::get_my)
        .service(routes::sub::renew)
        .service(routes::sub::cancel)
        .service(
            web::resource("/all")
                .wrap(RoleGuard::allow(&[Role::Admin]))
                .route(web::get().to(routes::sub::get_all)),
        )
        .service(
            web::resource("")
                .wrap(RoleGuard::allow(&[Role::Admin]))
                .route(web::post().to(routes::sub::create)),
        )
}
