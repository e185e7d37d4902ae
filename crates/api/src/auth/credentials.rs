//! The credential verifier: login name + password in, signed token out.

use cinelog_core::types::Timestamp;
use cinelog_db::models::account::Account;
use cinelog_db::repositories::AccountRepo;
use cinelog_db::DbPool;

use crate::auth::jwt::{generate_access_token, JwtConfig};
use crate::auth::password::{verify_against_decoy, verify_password};
use crate::auth::AuthError;
use crate::error::{AppError, AppResult};

/// Outcome of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub account: Account,
    pub token: String,
    pub expires_at: Timestamp,
}

/// Check `username`/`password` against the stored hash and mint a token valid
/// from `now`.
///
/// An unknown login and a wrong password both fail with
/// [`AuthError::AuthenticationFailed`], and both cost one Argon2
/// verification. Nothing is written to the database.
pub async fn verify_credentials(
    pool: &DbPool,
    config: &JwtConfig,
    username: &str,
    password: &str,
    now: Timestamp,
) -> AppResult<SignIn> {
    let Some(account) = AccountRepo::find_by_username(pool, username).await? else {
        verify_against_decoy(password);
        tracing::info!(%username, "Sign-in rejected: unknown login");
        return Err(AuthError::AuthenticationFailed.into());
    };

    let password_valid = verify_password(password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(%username, "Sign-in rejected: wrong password");
        return Err(AuthError::AuthenticationFailed.into());
    }

    let issued = generate_access_token(account.public_id, config, now)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(public_id = %account.public_id, expires_at = %issued.expires_at, "Signed in");

    Ok(SignIn {
        account,
        token: issued.token,
        expires_at: issued.expires_at,
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use assert_matches::assert_matches;
    use chrono::Utc;
    use cinelog_db::models::account::CreateAccount;
    use sqlx::SqlitePool;

    use super::*;
    use crate::auth::jwt::validate_token;
    use crate::auth::password::hash_password;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "credential-test-secret".to_string(),
            token_expiry_mins: 30,
        }
    }

    async fn create_alice(pool: &SqlitePool) -> Account {
        let input = CreateAccount {
            username: "alice".to_string(),
            password_hash: hash_password("correctpw").unwrap(),
            fullname: "Alice Liddell".to_string(),
            is_admin: false,
        };
        AccountRepo::create(pool, &input).await.unwrap()
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn test_valid_credentials_yield_token_for_account(pool: SqlitePool) {
        let alice = create_alice(&pool).await;
        let config = test_config();
        let now = Utc::now();

        let sign_in = verify_credentials(&pool, &config, "alice", "correctpw", now)
            .await
            .unwrap();

        let claims = validate_token(&sign_in.token, &config, now).unwrap();
        assert_eq!(claims.sub, alice.public_id);
        assert_eq!(sign_in.account.id, alice.id);
        assert_eq!(sign_in.expires_at.timestamp(), claims.exp);
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn test_wrong_password_and_unknown_login_fail_identically(pool: SqlitePool) {
        create_alice(&pool).await;
        let config = test_config();

        let wrong_password = verify_credentials(&pool, &config, "alice", "wrongpw", Utc::now())
            .await
            .unwrap_err();
        let unknown_login = verify_credentials(&pool, &config, "nobody", "correctpw", Utc::now())
            .await
            .unwrap_err();

        assert_matches!(wrong_password, AppError::Auth(AuthError::AuthenticationFailed));
        assert_matches!(unknown_login, AppError::Auth(AuthError::AuthenticationFailed));
    }

    /// Fastest of a few runs of one failing sign-in.
    async fn fastest_rejection(pool: &SqlitePool, username: &str) -> Duration {
        let config = test_config();
        let mut fastest = Duration::MAX;
        for _ in 0..3 {
            let started = Instant::now();
            let result = verify_credentials(pool, &config, username, "wrongpw", Utc::now()).await;
            fastest = fastest.min(started.elapsed());
            assert_matches!(result, Err(AppError::Auth(AuthError::AuthenticationFailed)));
        }
        fastest
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn test_unknown_login_costs_a_hash_verification(pool: SqlitePool) {
        create_alice(&pool).await;
        // First use builds the decoy hash; keep that out of the measurement.
        fastest_rejection(&pool, "nobody").await;

        let unknown_login = fastest_rejection(&pool, "nobody").await;
        let wrong_password = fastest_rejection(&pool, "alice").await;

        assert!(
            unknown_login * 4 >= wrong_password,
            "unknown login took {unknown_login:?}, wrong password took {wrong_password:?}"
        );
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn test_corrupt_stored_hash_is_internal_error(pool: SqlitePool) {
        let input = CreateAccount {
            username: "broken".to_string(),
            password_hash: "plaintext-oops".to_string(),
            fullname: "Broken".to_string(),
            is_admin: false,
        };
        AccountRepo::create(&pool, &input).await.unwrap();

        let err = verify_credentials(&pool, &test_config(), "broken", "whatever", Utc::now())
            .await
            .unwrap_err();
        assert_matches!(err, AppError::InternalError(_));
    }
}
