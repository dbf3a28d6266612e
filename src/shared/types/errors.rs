use std::time::Duration;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

/// Name of the partial unique index that allows one open reception per pickup point.
pub const OPEN_RECEPTION_INDEX: &str = "ux_receptions_open_per_pvz";

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse classification used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    BusinessRule,
    NotFound,
    Conflict,
    Unauthorized,
    Storage,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid city: {0}")]
    InvalidCity(String),

    #[error("Invalid product type: {0}")]
    InvalidProductType(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Pickup point {pvz_id} already has an open reception")]
    ActiveReceptionExists { pvz_id: Uuid },

    #[error("Pickup point {pvz_id} has no open reception")]
    NoActiveReception { pvz_id: Uuid },

    #[error("Reception {reception_id} is already closed")]
    AlreadyClosed { reception_id: Uuid },

    #[error("Reception {reception_id} is closed and cannot be modified")]
    ReceptionCannotBeModified { reception_id: Uuid },

    #[error("Reception {reception_id} has no products to delete")]
    NoProductsToDelete { reception_id: Uuid },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] InfraError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::MissingField(_)
            | DomainError::InvalidCity(_)
            | DomainError::InvalidProductType(_)
            | DomainError::InvalidRole(_)
            | DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::ActiveReceptionExists { .. }
            | DomainError::NoActiveReception { .. }
            | DomainError::AlreadyClosed { .. }
            | DomainError::ReceptionCannotBeModified { .. }
            | DomainError::NoProductsToDelete { .. } => ErrorKind::BusinessRule,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::InvalidCredentials => ErrorKind::Unauthorized,
            DomainError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Whether this error came from storage rather than from a rule the caller broke.
    pub fn is_storage(&self) -> bool {
        self.kind() == ErrorKind::Storage
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        DomainError::Storage(InfraError::Database(e))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Commit failed: {0}")]
    Commit(DbErr),

    #[error("Transaction timed out after {0:?}")]
    Timeout(Duration),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Returns the driver message when `err` is a unique constraint violation.
pub fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => Some(msg),
        _ => None,
    }
}

/// Whether a unique violation message points at the open reception index.
///
/// Postgres reports the index name; SQLite reports the indexed column.
pub fn is_open_reception_violation(msg: &str) -> bool {
    msg.contains(OPEN_RECEPTION_INDEX) || msg.contains("receptions.pvz_id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rules_are_not_storage() {
        let err = DomainError::NoActiveReception {
            pvz_id: Uuid::nil(),
        };
        assert_eq!(err.kind(), ErrorKind::BusinessRule);
        assert!(!err.is_storage());
    }

    #[test]
    fn db_errors_become_storage() {
        let err: DomainError = DbErr::Custom("boom".into()).into();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[test]
    fn recognizes_open_reception_index() {
        assert!(is_open_reception_violation(
            "duplicate key value violates unique constraint \"ux_receptions_open_per_pvz\""
        ));
        assert!(is_open_reception_violation(
            "UNIQUE constraint failed: receptions.pvz_id"
        ));
        assert!(!is_open_reception_violation(
            "UNIQUE constraint failed: receptions.id"
        ));
    }
}
