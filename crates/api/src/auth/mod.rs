//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed, time-limited access tokens.
//! - [`basic`] -- `Authorization: Basic` header parsing for sign-in.
//! - [`credentials`] -- the credential verifier that turns a login/password
//!   pair into a token.

pub mod basic;
pub mod credentials;
pub mod jwt;
pub mod password;

/// Request header carrying the access token on protected operations.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// `WWW-Authenticate` challenge returned when sign-in fails.
pub const LOGIN_CHALLENGE: &str = "Basic realm=\"Login required!\"";

/// Why the access gate turned a request away.
///
/// The messages are generic: an expired token and a tampered
/// one both surface as [`Unauthorized::InvalidCredential`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unauthorized {
    #[error("missing credential")]
    MissingCredential,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("unknown subject")]
    UnknownSubject,
}

/// Authentication failures. All are terminal for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Bad login/password at sign-in. Raised identically for an unknown login
    /// and a wrong password.
    #[error("could not verify")]
    AuthenticationFailed,

    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),
}
