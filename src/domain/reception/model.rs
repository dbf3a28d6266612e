//! Reception domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::product::Product;
use crate::shared::DomainError;

/// Reception status. `Close` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceptionStatus {
    /// Products may be added and removed
    InProgress,
    /// Closed, no further changes
    Close,
}

impl ReceptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Close => "close",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "close" => Ok(Self::Close),
            other => Err(DomainError::Validation(format!(
                "unknown reception status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reception {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub pvz_id: Uuid,
    pub status: ReceptionStatus,
}

impl Reception {
    /// A fresh, open reception for the given pickup point. Ids are UUIDv7
    /// so the latest reception is also the greatest id.
    pub fn open(pvz_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            date_time: Utc::now(),
            pvz_id,
            status: ReceptionStatus::InProgress,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == ReceptionStatus::InProgress
    }

    /// Guard for appending or removing products
    pub fn ensure_modifiable(&self) -> Result<(), DomainError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DomainError::ReceptionCannotBeModified {
                reception_id: self.id,
            })
        }
    }
}

/// A reception with its products, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct ReceptionWithProducts {
    pub reception: Reception,
    pub products: Vec<Product>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reception_is_open() {
        let pvz_id = Uuid::new_v4();
        let r = Reception::open(pvz_id);
        assert!(r.is_open());
        assert_eq!(r.pvz_id, pvz_id);
        assert!(r.ensure_modifiable().is_ok());
    }

    #[test]
    fn closed_reception_cannot_be_modified() {
        let mut r = Reception::open(Uuid::new_v4());
        r.status = ReceptionStatus::Close;
        assert!(!r.is_open());
        assert!(matches!(
            r.ensure_modifiable(),
            Err(DomainError::ReceptionCannotBeModified { .. })
        ));
    }

    #[test]
    fn status_round_trips_through_storage_names() {
        for s in [ReceptionStatus::InProgress, ReceptionStatus::Close] {
            assert_eq!(ReceptionStatus::parse(s.as_str()).unwrap(), s);
        }
        assert!(ReceptionStatus::parse("open").is_err());
    }
}
