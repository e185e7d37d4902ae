//! Argon2id password hashing and verification.
//!
//! Hashes are stored as PHC strings, so the salt and cost parameters travel
//! with the hash and [`verify_password`] needs nothing but the stored value.

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash of a throwaway password, made with the same parameters as real
/// account hashes. Sign-in checks an unknown login against it so that path
/// costs one full Argon2 verification too.
static DECOY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("cinelog-decoy-password").ok());

/// Hash `password` with Argon2id and a fresh random salt, returning the PHC
/// string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check `password` against a stored PHC hash.
///
/// `Ok(false)` means the password is wrong; `Err` means the stored value is
/// not a usable hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Spend one Argon2 verification on `password` without an account to check
/// it against. Always rejects.
pub fn verify_against_decoy(password: &str) -> bool {
    match DECOY_HASH.as_deref() {
        Some(hash) => {
            let _ = verify_password(password, hash);
        }
        None => tracing::warn!("Decoy password hash unavailable"),
    }
    false
}
