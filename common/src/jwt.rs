use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
    role::Role,
};

/// Bearer-token claims. Self-contained: there is no server-side revocation
/// list, so a token stays valid for its full TTL even if the account is
/// deactivated afterwards. The auth middleware re-fetches the account on
/// every request to mitigate that.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub account_id: Uuid,
    pub email: String,
    pub role: Role,
    pub has_subscription: bool,
    pub exp: usize,
}

pub struct ClaimsSpec {
    pub account_id: Uuid,
    pub email: String,
    pub role: Role,
    pub has_subscription: bool,
}

fn encode(spec: ClaimsSpec, secret: &str, ttl_hours: i64) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        account_id: spec.account_id,
        email: spec.email,
        role: spec.role,
        has_subscription: spec.has_subscription,
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Generates an access token from the claims spec and JWT configuration.
pub fn generate(spec: ClaimsSpec, config: &JwtConfig) -> Res<String> {
    encode(spec, &config.secret, config.expiration_hours)
}

/// Generates a refresh token. Same signing key, longer TTL.
pub fn generate_refresh(spec: ClaimsSpec, config: &JwtConfig) -> Res<String> {
    encode(spec, &config.secret, config.refresh_expiration_hours)
}

/// Extracts claims from a token. Invalid signatures and expired tokens are
/// expected branches, so the raw decode result is returned instead of being
/// folded into `AppError`.
pub fn validate(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 24,
            refresh_expiration_hours: 720,
        }
    }

    fn spec() -> ClaimsSpec {
        ClaimsSpec {
            account_id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            role: Role::Manager,
            has_subscription: false,
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let cfg = config();
        let spec = spec();
        let account_id = spec.account_id;
        let token = generate(spec, &cfg).unwrap();

        let claims = validate(&token, &cfg.secret).unwrap();
        assert_eq!(claims.account_id, account_id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, Role::Manager);
        assert!(!claims.has_subscription);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let cfg = config();
        let token = generate(spec(), &cfg).unwrap();
        assert!(validate(&token, "other-secret").is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let cfg = config();
        let token = generate(spec(), &cfg).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = jsonwebtoken::encode(
            &Header::default(),
            &Claims {
                account_id: Uuid::new_v4(),
                email: "evil@x.com".to_string(),
                role: Role::Admin,
                has_subscription: true,
                exp: (Utc::now().timestamp() + 3600) as usize,
            },
            &EncodingKey::from_secret(b"attacker"),
        )
        .unwrap();
        let forged_payload: Vec<&str> = forged.split('.').collect();
        parts[1] = forged_payload[1];
        let spliced = parts.join(".");
        assert!(validate(&spliced, &cfg.secret).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = config();
        // jsonwebtoken's default validation keeps a 60s leeway
        let token = encode(spec(), &cfg.secret, -2).unwrap();
        let err = validate(&token, &cfg.secret).unwrap_err();
        assert_eq!(
            err.kind(),
            &jsonwebtoken::errors::ErrorKind::ExpiredSignature
        );
    }
}
