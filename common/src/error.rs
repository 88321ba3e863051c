use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // === APPLICATION ERRORS ===
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Subscription expired. Please renew to continue")]
    SubscriptionExpired,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    TooManyRequests(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "success": false, "message": err_msg })
            } else {
                serde_json::json!({ "success": false, "message": "Internal server error" })
            }
        };

        let to_json = || serde_json::json!({ "success": false, "message": self.to_string() });

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Jwt(error) => {
                log::error!("JWT error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::Validation(_) | AppError::Conflict(_) => {
                HttpResponse::BadRequest().json(to_json())
            }
            AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(to_json()),
            AppError::Forbidden(_) => HttpResponse::Forbidden().json(to_json()),
            // Machine-readable flag: the dashboard redirects to billing
            // instead of showing a generic permission error.
            AppError::SubscriptionExpired => HttpResponse::Forbidden().json(serde_json::json!({
                "success": false,
                "message": self.to_string(),
                "subscriptionExpired": true,
            })),
            AppError::NotFound(_) => HttpResponse::NotFound().json(to_json()),
            AppError::TooManyRequests(_) => HttpResponse::TooManyRequests().json(to_json()),
            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (AppError::SubscriptionExpired, StatusCode::FORBIDDEN),
            (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                AppError::TooManyRequests("slow down".into()),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.error_response().status(), expected, "{err:?}");
        }
    }

    #[actix_web::test]
    async fn subscription_expired_carries_flag() {
        let res = AppError::SubscriptionExpired.to_http_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        // The flag is part of the contract with the frontend billing redirect.
        let bytes = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["subscriptionExpired"], serde_json::json!(true));
        assert_eq!(json["success"], serde_json::json!(false));
    }
}
