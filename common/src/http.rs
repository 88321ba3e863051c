use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use super::error::Res;

/// Builders for the standard response envelope:
/// `{ "success": true, "message"?: ..., "data"?: ... }`
pub struct Success;

impl Success {
    pub fn ok<T: Serialize>(data: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
    }

    pub fn ok_message<T: Serialize>(message: &str, data: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Ok().json(json!({ "success": true, "message": message, "data": data })))
    }

    pub fn created<T: Serialize>(message: &str, data: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Created()
            .json(json!({ "success": true, "message": message, "data": data })))
    }

    pub fn message(message: &str) -> Res<HttpResponse> {
        Ok(HttpResponse::Ok().json(json!({ "success": true, "message": message })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn envelope_shape() {
        let res = Success::created("created", json!({ "id": 7 })).unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let bytes = actix_web::body::to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["id"], json!(7));
    }
}
