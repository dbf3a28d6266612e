//! Pickup point (PVZ) domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::reception::ReceptionWithProducts;
use crate::shared::DomainError;

/// Cities a pickup point may be opened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Moscow,
    SaintPetersburg,
    Kazan,
}

impl City {
    pub const ALL: [City; 3] = [City::Moscow, City::SaintPetersburg, City::Kazan];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moscow => "Москва",
            Self::SaintPetersburg => "Санкт-Петербург",
            Self::Kazan => "Казань",
        }
    }

    /// Parses the stored/wire name. An empty string is a missing field,
    /// anything else unknown is an invalid city.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.is_empty() {
            return Err(DomainError::MissingField("city"));
        }
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCity(s.to_string()))
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pickup point. Never updated or deleted once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct PickupPoint {
    pub id: Uuid,
    pub registration_date: DateTime<Utc>,
    pub city: City,
}

impl PickupPoint {
    pub fn new(city: City) -> Self {
        Self {
            id: Uuid::new_v4(),
            registration_date: Utc::now(),
            city,
        }
    }
}

/// Listing read model: a pickup point with its receptions and their products
#[derive(Debug, Clone, PartialEq)]
pub struct PickupPointWithReceptions {
    pub pvz: PickupPoint,
    pub receptions: Vec<ReceptionWithProducts>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_cities() {
        assert_eq!(City::parse("Москва").unwrap(), City::Moscow);
        assert_eq!(City::parse("Санкт-Петербург").unwrap(), City::SaintPetersburg);
        assert_eq!(City::parse("Казань").unwrap(), City::Kazan);
    }

    #[test]
    fn rejects_unknown_city() {
        assert!(matches!(
            City::parse("Новосибирск"),
            Err(DomainError::InvalidCity(_))
        ));
        assert!(matches!(
            City::parse(""),
            Err(DomainError::MissingField("city"))
        ));
    }

    #[test]
    fn new_pickup_point_gets_fresh_id() {
        let a = PickupPoint::new(City::Kazan);
        let b = PickupPoint::new(City::Kazan);
        assert_ne!(a.id, b.id);
        assert_eq!(a.city, City::Kazan);
    }
}
