//! Identity service — application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here.

use tracing::info;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::{Repositories, TxManager};
use crate::shared::{validate_email, InfraError};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct IdentityService {
    tx: TxManager,
    repos: Repositories,
    jwt_config: JwtConfig,
}

impl IdentityService {
    pub fn new(tx: TxManager, jwt_config: JwtConfig) -> Self {
        Self {
            tx,
            repos: Repositories::default(),
            jwt_config,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    fn issue(&self, user_id: Uuid, role: UserRole) -> DomainResult<AuthResult> {
        let token = create_token(&user_id.to_string(), role, &self.jwt_config)
            .map_err(|e| InfraError::Crypto(format!("Failed to create token: {}", e)))?;
        Ok(AuthResult {
            token,
            expires_in: self.jwt_config.expiration_hours * 3600,
        })
    }

    // ── Authentication ──────────────────────────────────────────

    /// Token for a role without a stored user; the subject is a fresh id.
    pub fn dummy_login(&self, role: &str) -> DomainResult<AuthResult> {
        let role = UserRole::parse(role)?;
        info!(role = %role, "Dummy login");
        self.issue(Uuid::new_v4(), role)
    }

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self
            .repos
            .users
            .find_by_email(self.tx.connection(), email)
            .await?;

        let Some(user) = user else {
            return Err(DomainError::InvalidCredentials);
        };

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| InfraError::Crypto(format!("Failed to verify password: {}", e)))?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(user.id, user.role)
    }

    // ── Registration ────────────────────────────────────────────

    pub async fn register(&self, email: &str, password: &str, role: &str) -> DomainResult<User> {
        if email.is_empty() {
            return Err(DomainError::MissingField("email"));
        }
        validate_email(email)?;
        if password.is_empty() {
            return Err(DomainError::MissingField("password"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        let role = UserRole::parse(role)?;

        let password_hash = hash_password(password)
            .map_err(|e| InfraError::Crypto(format!("Failed to hash password: {}", e)))?;
        let user = User::new(email, password_hash, role);
        let repo = self.repos.users;

        let created = self
            .tx
            .run_in_transaction(move |txn| Box::pin(async move { repo.insert(txn, &user).await }))
            .await?;

        info!(user_id = %created.id, role = %created.role, "User registered");
        Ok(created)
    }
}
