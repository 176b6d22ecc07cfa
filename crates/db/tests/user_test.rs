//! Integration tests for the user repository.

mod common;

use invoicer_core::auth::{Credentials, authorize, hash_password};
use invoicer_db::UserRepository;

use common::{connect, marker};

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_get_user_by_email() {
    let db = connect().await;
    let repo = UserRepository::new(db);
    let email = format!("{}@nextmail.com", marker());

    let created = repo
        .create("Test User", &email, "$argon2id$test_hash")
        .await
        .expect("Failed to create user");

    let found = repo
        .get_user(&email)
        .await
        .expect("Failed to find user")
        .expect("User should exist");

    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Test User");
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_get_user_not_found() {
    let db = connect().await;
    let repo = UserRepository::new(db);

    let found = repo
        .get_user(&format!("{}@nextmail.com", marker()))
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_authorize_against_stored_hash() {
    let db = connect().await;
    let repo = UserRepository::new(db);
    let email = format!("{}@nextmail.com", marker());
    let hash = hash_password("123456").unwrap();
    repo.create("User", &email, &hash).await.unwrap();

    let ok = authorize(&repo, &Credentials::new(&email, "123456"))
        .await
        .unwrap();
    assert_eq!(ok.map(|u| u.email), Some(email.clone()));

    let wrong = authorize(&repo, &Credentials::new(&email, "654321"))
        .await
        .unwrap();
    assert!(wrong.is_none());
}
