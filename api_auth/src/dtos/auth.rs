use db::models::account::Account;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Login/register payload. The dashboard reads `hasSubscription` to decide
/// whether to route straight to billing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub account: Account,
    pub has_subscription: bool,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::role::Role;
    use db::models::account::AccountStatus;
    use uuid::Uuid;

    #[test]
    fn auth_response_uses_camel_case_keys() {
        let response = AuthResponse {
            account: Account {
                id: Uuid::new_v4(),
                name: "A".to_string(),
                email: "a@x.com".to_string(),
                password_hash: "secret-hash".to_string(),
                phone: None,
                address: None,
                role: Role::Manager,
                status: AccountStatus::Active,
                created_at: Utc::now(),
            },
            has_subscription: false,
            token: "t".to_string(),
            refresh_token: "r".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("hasSubscription").is_some());
        assert!(json.get("refreshToken").is_some());
        assert!(json.get("has_subscription").is_none());
        // the hash must never serialize
        assert!(json["account"].get("password_hash").is_none());
    }
}
