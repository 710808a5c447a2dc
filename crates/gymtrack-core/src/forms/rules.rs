//! Individual validation predicates.

use super::{Field, FieldError};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Largest accepted profile photo (5 MiB).
pub const AVATAR_MAX_BYTES: u64 = 5 * 1024 * 1024;

pub const AVATAR_TOO_LARGE: &str = "This image is too large. Choose one up to 5MB";

/// Loose address check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// # Errors
/// Returns a `FieldError` for `Field::Avatar` when `size` exceeds the limit.
pub fn check_avatar_size(size: u64) -> Result<(), FieldError> {
    if size > AVATAR_MAX_BYTES {
        Err(FieldError::new(Field::Avatar, AVATAR_TOO_LARGE))
    } else {
        Ok(())
    }
}
