use turnstile_core::AppError;
use turnstile_core::models::NewUser;
use turnstile_core::traits::{USER_NOT_FOUND, UserStore};
use turnstile_db::UserRepository;

use crate::integration::common::setup_test_db;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.into(),
        password_digest: "$2b$04$abcdefghijklmnopqrstuuXfakeDigestForRepositoryTests".into(),
    }
}

#[tokio::test]
async fn create_and_find_user() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let id = repo.create_user(&new_user("a@b.com")).await.unwrap();
    assert!(id > 0);

    let user = repo.find_user_by_email("a@b.com").await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.password, new_user("a@b.com").password_digest);
}

#[tokio::test]
async fn ids_are_assigned_by_the_store() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let first = repo.create_user(&new_user("first@b.com")).await.unwrap();
    let second = repo.create_user(&new_user("second@b.com")).await.unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool.clone());

    repo.create_user(&new_user("dup@b.com")).await.unwrap();
    let err = repo.create_user(&new_user("dup@b.com")).await.unwrap_err();
    assert!(matches!(err, AppError::DatabaseError(_)));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("dup@b.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let err = repo.find_user_by_email("nobody@b.com").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg == USER_NOT_FOUND));
}

#[tokio::test]
async fn closed_pool_is_a_database_error() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool.clone());
    pool.close().await;

    assert!(matches!(
        repo.find_user_by_email("a@b.com").await,
        Err(AppError::DatabaseError(_))
    ));
    assert!(repo.health_check().await.is_err());
}

#[tokio::test]
async fn trait_dispatch_matches_inherent_methods() {
    let (pool, _container) = setup_test_db().await;
    let repo = UserRepository::new(pool);

    let id = UserStore::create_user(&repo, &new_user("t@b.com")).await.unwrap();
    let user = UserStore::find_user_by_email(&repo, "t@b.com").await.unwrap();
    assert_eq!(user.id, id);
    UserStore::health_check(&repo).await.unwrap();
}
