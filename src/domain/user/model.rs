use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::DomainError;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Employee,
    Moderator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Moderator => "moderator",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "employee" => Ok(Self::Employee),
            "moderator" => Ok(Self::Moderator),
            "" => Err(DomainError::MissingField("role")),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles() {
        assert_eq!(UserRole::parse("employee").unwrap(), UserRole::Employee);
        assert_eq!(UserRole::parse("moderator").unwrap(), UserRole::Moderator);
        assert!(matches!(
            UserRole::parse("admin"),
            Err(DomainError::InvalidRole(_))
        ));
    }
}
