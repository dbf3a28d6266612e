mod common;

use pvz_service::domain::{DomainError, User, UserRole};
use pvz_service::shared::InfraError;
use pvz_service::Repositories;

#[tokio::test]
async fn login_checks_the_stored_hash() {
    let s = common::setup().await;
    s.identity
        .register("clerk@pvz.ru", "secret-pass", "employee")
        .await
        .unwrap();

    let auth = s.identity.login("clerk@pvz.ru", "secret-pass").await.unwrap();
    assert!(!auth.token.is_empty());

    assert!(matches!(
        s.identity.login("clerk@pvz.ru", "wrong-pass").await,
        Err(DomainError::InvalidCredentials)
    ));
    assert!(matches!(
        s.identity.login("nobody@pvz.ru", "secret-pass").await,
        Err(DomainError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn unreadable_stored_hash_is_a_storage_error() {
    let s = common::setup().await;
    let repos = Repositories::default();
    let user = User::new("broken@pvz.ru", "not-a-bcrypt-hash", UserRole::Moderator);
    repos.users.insert(s.tx.connection(), &user).await.unwrap();

    let err = s.identity.login("broken@pvz.ru", "whatever").await.unwrap_err();

    assert!(
        matches!(err, DomainError::Storage(InfraError::Crypto(_))),
        "got {:?}",
        err
    );
    assert!(err.is_storage());
}
