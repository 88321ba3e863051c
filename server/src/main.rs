mod cors;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};
use common::env_config::Config;
use common::http::Success;

async fn health() -> common::error::Res<HttpResponse> {
    Success::message("OK")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // spawn the daily lifecycle jobs
    let notifier: Arc<dyn scheduler::Notify> = if config.smtp.enabled {
        Arc::new(
            scheduler::SmtpNotifier::new(&config.smtp).expect("Failed to set up SMTP notifier"),
        )
    } else {
        log::info!("SMTP disabled; lifecycle notifications will only be logged");
        Arc::new(scheduler::LogNotifier)
    };
    scheduler::spawn_all(pool.clone(), notifier);

    // both rate-limit tiers share one window; the limiters are created
    // outside the factory so every worker shares the same budgets
    let window = Duration::from_secs(config.rate_limit_window_secs);
    let api_limiter = limiter::client_middleware(config.rate_limit_max_requests, window);
    let auth_limiter = limiter::client_middleware(config.auth_rate_limit_max_requests, window);

    log::info!(
        "Starting server on {}:{}",
        config.server_host,
        config.server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware())
            .wrap(cors::middleware(&origin))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health))
                    .service(
                        web::scope("/v1")
                            .service(api_auth::mount_auth(auth_limiter.clone()))
                            // actix runs the last-registered wrap first, so
                            // the limiter is registered last: it must count
                            // and reject before auth touches the database
                            .service(
                                api_subs::mount_subs()
                                    .wrap(api_auth::AuthMiddleware)
                                    .wrap(api_limiter.clone()),
                            )
                            .service(
                                api_props::mount_buildings()
                                    .wrap(api_subs::SubscriptionGate)
                                    .wrap(api_auth::AuthMiddleware)
                                    .wrap(api_limiter.clone()),
                            )
                            .service(
                                api_props::mount_units()
                                    .wrap(api_subs::SubscriptionGate)
                                    .wrap(api_auth::AuthMiddleware)
                                    .wrap(api_limiter.clone()),
                            )
                            .service(
                                api_props::mount_invoices()
                                    .wrap(api_subs::SubscriptionGate)
                                    .wrap(api_auth::AuthMiddleware)
                                    .wrap(api_limiter.clone()),
                            ),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::{App, HttpResponse, http::StatusCode, test, web};
    use common::env_config::{Config, JwtConfig, SmtpConfig};
    use sqlx::PgPool;

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

    // The limiter is the outermost wrap on the protected scopes, so it has
    // to count a request even when auth would reject it. With a budget of
    // one, the second token-less request must hit 429, not 401.
    #[actix_web::test]
    async fn limiter_counts_requests_auth_rejects() {
        let pool = Arc::new(PgPool::connect_lazy("postgres://localhost/unused").unwrap());
        let limiter = limiter::client_middleware(1, Duration::from_secs(60));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .app_data(web::Data::new(test_config()))
                .service(
                    web::resource("/guarded")
                        .route(web::get().to(|| async { HttpResponse::Ok().finish() }))
                        .wrap(api_auth::AuthMiddleware)
                        .wrap(limiter),
                ),
        )
        .await;

        let first = test::TestRequest::get().uri("/guarded").to_request();
        assert_eq!(
            test::call_service(&app, first).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let second = test::TestRequest::get().uri("/guarded").to_request();
        assert_eq!(
            test::call_service(&app, second).await.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
