//! Field rules that `validator` length checks cannot express.

use crate::error::CoreError;

/// Minimum password length accepted at sign-up and on password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A release year is exactly four ASCII digits (e.g. `"1999"`).
pub fn validate_release_year(year: &str) -> Result<(), CoreError> {
    if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "year must be four digits, got '{year}'"
        )))
    }
}

/// Reject passwords shorter than `min_length` characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}
