use std::{env, sync::Arc};

/// Configuration struct for the server.
///
/// Constructed once at startup and passed into the data-access layer,
/// middleware and scheduler via `web::Data` / explicit arguments; nothing
/// reads the environment after this point.
#[derive(Clone, Debug)]
pub struct Config {
    /// "development" or "production".
    pub environment: String,
    /// The URL of the Postgres database to connect to.
    pub database_url: String,
    /// JWT signing/verification configuration.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS.
    pub cors_allowed_origin: String,
    /// Whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Rate-limit window in seconds (shared by both tiers).
    pub rate_limit_window_secs: u64,
    /// Max requests per window per client for the general API.
    pub rate_limit_max_requests: u32,
    /// Max requests per window per client for the auth endpoints.
    pub auth_rate_limit_max_requests: u32,
    /// SMTP settings for lifecycle notifications.
    pub smtp: SmtpConfig,
}

/// Configuration for JSON Web Token (JWT) authentication.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// Access-token TTL in hours.
    pub expiration_hours: i64,
    /// Refresh-token TTL in hours.
    pub refresh_expiration_hours: i64,
}

#[derive(Clone, Debug)]
pub struct SmtpConfig {
    /// When false, notifications are logged instead of sent.
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl JwtConfig {
    /// Reads the JWT configuration from environment variables:
    /// - `JWT_SECRET`: required.
    /// - `JWT_EXPIRATION_HOURS`: optional, defaults to 168 (7 days).
    /// - `JWT_REFRESH_EXPIRATION_HOURS`: optional, defaults to 720 (30 days).
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or a TTL cannot be parsed.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "168".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a valid number"),
            refresh_expiration_hours: env::var("JWT_REFRESH_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "720".to_string())
                .parse()
                .expect("JWT_REFRESH_EXPIRATION_HOURS must be a valid number"),
        }
    }
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// Required: `ENVIRONMENT`, `DATABASE_URL`, `JWT_SECRET`.
    /// Everything else has a development default.
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric value cannot
    /// be parsed.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_config: JwtConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .expect("RATE_LIMIT_WINDOW_SECS must be a valid number"),
            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("RATE_LIMIT_MAX_REQUESTS must be a valid number"),
            auth_rate_limit_max_requests: env::var("AUTH_RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("AUTH_RATE_LIMIT_MAX_REQUESTS must be a valid number"),
            smtp: SmtpConfig {
                enabled: env::var("SMTP_ENABLED")
                    .unwrap_or_else(|_| "false".to_string())
                    .to_lowercase()
                    == "true",
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .unwrap_or(587),
                username: env::var("SMTP_USERNAME").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                from: env::var("SMTP_FROM")
                    .unwrap_or_else(|_| "Sakan <noreply@sakan.example>".to_string()),
            },
        })
    }
}
