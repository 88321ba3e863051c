use common::{
    env_config::Config,
    error::{AppError, Res},
    jwt::{self, ClaimsSpec},
    password,
};
use db::models::account::{Account, AccountStatus};
use sqlx::PgPool;

/// Authenticates an account by email and password.
///
/// Unknown email and wrong password both map to the same 401 so the
/// response does not reveal which half failed; a disabled account gets a
/// distinct 403 (matching the login endpoint's contract, which differs
/// from the middleware's blanket 401).
pub async fn authenticate(pool: &PgPool, email: &str, plain_password: &str) -> Res<Account> {
    let account = db::account::find_by_email(pool, email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if account.status != AccountStatus::Active {
        return Err(AppError::Forbidden(
            "Account is disabled. Please contact support".to_string(),
        ));
    }

    if !password::verify(plain_password, &account.password_hash) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(account)
}

fn claims_spec(account: &Account, has_subscription: bool) -> ClaimsSpec {
    ClaimsSpec {
        account_id: account.id,
        email: account.email.clone(),
        role: account.role,
        has_subscription,
    }
}

/// Mints an access/refresh token pair for the account.
pub fn issue_tokens(
    account: &Account,
    has_subscription: bool,
    config: &Config,
) -> Res<(String, String)> {
    let token = jwt::generate(claims_spec(account, has_subscription), &config.jwt_config)?;
    let refresh = jwt::generate_refresh(claims_spec(account, has_subscription), &config.jwt_config)?;
    Ok((token, refresh))
}
