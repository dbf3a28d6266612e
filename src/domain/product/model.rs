//! Product domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Electronics,
    Clothes,
    Shoes,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Electronics,
        ProductType::Clothes,
        ProductType::Shoes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "электроника",
            Self::Clothes => "одежда",
            Self::Shoes => "обувь",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.is_empty() {
            return Err(DomainError::MissingField("type"));
        }
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::InvalidProductType(s.to_string()))
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub product_type: ProductType,
    pub reception_id: Uuid,
}

impl Product {
    /// Ids are UUIDv7 so that id order follows creation order and breaks
    /// timestamp ties when picking the most recent product.
    pub fn new(product_type: ProductType, reception_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            date_time: Utc::now(),
            product_type,
            reception_id,
        }
    }
}
