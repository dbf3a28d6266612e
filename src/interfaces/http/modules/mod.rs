pub mod auth;
pub mod health;
pub mod metrics;
pub mod products;
pub mod pvz;
pub mod receptions;
pub mod request_id;
