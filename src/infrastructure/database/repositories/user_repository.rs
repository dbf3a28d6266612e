use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{User, UserRole};
use crate::infrastructure::database::entities::user;
use crate::shared::{unique_violation, DomainError, DomainResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct UserRepository;

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Employee => UserRole::Employee,
        user::UserRole::Moderator => UserRole::Moderator,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Employee => user::UserRole::Employee,
        UserRole::Moderator => user::UserRole::Moderator,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
    }
}

// ── Queries ─────────────────────────────────────────────────────

impl UserRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(user_model_to_domain))
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        &self,
        conn: &C,
        email: &str,
    ) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(conn)
            .await?;
        Ok(model.map(user_model_to_domain))
    }

    /// Duplicate email (or id) is reported as `Conflict`.
    pub async fn insert<C: ConnectionTrait>(&self, conn: &C, u: &User) -> DomainResult<User> {
        debug!(user_id = %u.id, role = %u.role, "Inserting user");

        let model = user::ActiveModel {
            id: Set(u.id),
            email: Set(u.email.clone()),
            password_hash: Set(u.password_hash.clone()),
            role: Set(domain_role_to_entity(u.role)),
            created_at: Set(u.created_at),
        };
        match model.insert(conn).await {
            Ok(saved) => Ok(user_model_to_domain(saved)),
            Err(e) => match unique_violation(&e) {
                Some(_) => Err(DomainError::Conflict(
                    "User with this email already exists".to_string(),
                )),
                None => Err(e.into()),
            },
        }
    }
}
