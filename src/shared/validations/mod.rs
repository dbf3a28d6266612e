use validator::ValidateEmail;

use super::types::errors::DomainError;
use super::types::pagination::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.to_string().validate_email() {
        Ok(())
    } else {
        Err(DomainError::Validation(format!("invalid email '{}'", email)))
    }
}

/// Normalizes listing parameters. A page below 1 becomes 1; a limit outside
/// `1..=MAX_PAGE_LIMIT` falls back to the default rather than being clamped.
pub fn validate_pagination(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = match limit {
        Some(l) if (1..=MAX_PAGE_LIMIT).contains(&l) => l,
        _ => DEFAULT_PAGE_LIMIT,
    };
    (page, limit)
}
