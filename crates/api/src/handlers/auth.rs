//! Handlers for the `/auth` resource (sign-up, sign-in, current account).

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use cinelog_core::types::Timestamp;
use cinelog_db::models::account::AccountResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::basic::parse_basic_authorization;
use crate::auth::credentials::{verify_credentials, SignIn};
use crate::auth::AuthError;
use crate::error::AppResult;
use crate::handlers::accounts::{create_account, NewAccount};
use crate::middleware::auth::CurrentAccount;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 128))]
    pub username: String,
    pub password: String,
    #[validate(length(min = 1, max = 128))]
    pub fullname: String,
}

/// Request body for `POST /auth/token`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a new (non-admin) account. Returns 201 with the public account
/// representation.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AccountResponse>>)> {
    input.validate()?;

    let account = create_account(
        &state,
        NewAccount {
            username: input.username,
            password: input.password,
            fullname: input.fullname,
            is_admin: false,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AccountResponse::from(&account),
        }),
    ))
}

/// GET|POST /api/v1/auth/login
///
/// Sign in with HTTP Basic credentials. Failure yields 401 with a
/// `WWW-Authenticate` challenge.
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Json<TokenResponse>> {
    let credentials = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_basic_authorization)
        .ok_or(AuthError::AuthenticationFailed)?;

    let now = Utc::now();
    let sign_in = verify_credentials(
        &state.pool,
        &state.config.jwt,
        &credentials.username,
        &credentials.password,
        now,
    )
    .await?;

    Ok(Json(token_response(sign_in, now)))
}

/// POST /api/v1/auth/token
///
/// Sign in with a JSON body instead of a Basic header.
pub async fn token(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let now = Utc::now();
    let sign_in = verify_credentials(
        &state.pool,
        &state.config.jwt,
        &input.username,
        &input.password,
        now,
    )
    .await?;

    Ok(Json(token_response(sign_in, now)))
}

/// GET /api/v1/auth/me
pub async fn me(CurrentAccount(account): CurrentAccount) -> Json<DataResponse<AccountResponse>> {
    Json(DataResponse {
        data: AccountResponse::from(&account),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn token_response(sign_in: SignIn, issued_at: Timestamp) -> TokenResponse {
    TokenResponse {
        expires_in: sign_in.expires_at.timestamp() - issued_at.timestamp(),
        token: sign_in.token,
    }
}
