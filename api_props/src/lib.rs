use actix_web::web;

pub mod routes {
    pub mod building;
    pub mod invoice;
    pub mod unit;
}

mod dtos {
    pub(crate) mod building;
    pub(crate) mod invoice;
    pub(crate) mod unit;
}

/// Tenant-scoped CRUD scopes. All three expect AuthMiddleware and
/// SubscriptionGate to be wrapped around them by the caller.
pub fn mount_buildings() -> actix_web::Scope {
    web::scope("/buildings")
        .service(routes::building::list)
        .service(routes::building::get_stats)
        .service(routes::building::get_one)
        .service(routes::building::create)
        .service(routes::building::update)
        .service(routes::building::remove)
}

pub fn mount_units() -> actix_web::Scope {
    web::scope("/units")
        .service(routes::unit::list)
        .service(routes::unit::tenants_history)
        .service(routes::unit::get_one)
        .service(routes::unit::create)
        .service(routes::unit::update)
        .service(routes::unit::remove)
}

pub fn mount_invoices() -> actix_web::Scope {
    web::scope("/invoices")
        .service(routes::invoice::list)
        .service(routes::invoice::pay)
        .service(routes::invoice::get_one)
        .service(routes::invoice::create)
        .service(routes::invoice::update)
        .service(routes::invoice::remove)
}
