//! Tests for the `PostgreSQL` user store.
//!
//! These tests require a reachable `PostgreSQL` database:
//!
//! ```bash
//! STUD_TEST_DATABASE_URL=postgres://localhost/stud_test \
//!     cargo test -p stud-server --test pg_user_store -- --ignored
//! ```
//!
//! Emails are randomized per test so runs never collide with existing rows.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use uuid::Uuid;

use stud_core::{Email, UserId};
use stud_server::db::{PgUserStore, RepositoryError, StoreBackend, UserStore, create_pool};
use stud_server::models::NewUser;

async fn store() -> PgUserStore {
    let url = std::env::var("STUD_TEST_DATABASE_URL")
        .expect("STUD_TEST_DATABASE_URL must be set for PostgreSQL tests");
    let pool = create_pool(&SecretString::from(url)).await.unwrap();
    PgUserStore::connect(pool).await.unwrap()
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", Uuid::new_v4().simple())
}

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: Email::parse(email).unwrap(),
    }
}

#[tokio::test]
#[ignore = "Requires STUD_TEST_DATABASE_URL"]
async fn test_create_get_delete() {
    let store = store().await;
    assert_eq!(store.backend(), StoreBackend::Postgres);

    let created = store
        .create(new_user("Ada", &unique_email("ada")))
        .await
        .unwrap();
    assert_eq!(store.get_by_id(&created.id).await.unwrap(), created);

    let deleted = store.delete_by_id(&created.id).await.unwrap();
    assert_eq!(deleted, created);

    assert!(matches!(
        store.get_by_id(&created.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        store.delete_by_id(&created.id).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "Requires STUD_TEST_DATABASE_URL"]
async fn test_duplicate_email_ignoring_case_conflicts() {
    let store = store().await;
    let email = unique_email("dup");

    let created = store.create(new_user("First", &email)).await.unwrap();
    let err = store
        .create(new_user("Second", &email.to_uppercase()))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    store.delete_by_id(&created.id).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires STUD_TEST_DATABASE_URL"]
async fn test_list_is_newest_first() {
    let store = store().await;

    let mut created = Vec::new();
    for n in 1..=3 {
        let user = store
            .create(new_user(&format!("U{n}"), &unique_email("order")))
            .await
            .unwrap();
        created.push(user);
    }

    let ours: Vec<UserId> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|user| created.iter().any(|c| c.id == user.id))
        .map(|user| user.id)
        .collect();
    let expected: Vec<UserId> = created.iter().rev().map(|user| user.id.clone()).collect();
    assert_eq!(ours, expected);

    for user in created {
        store.delete_by_id(&user.id).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "Requires STUD_TEST_DATABASE_URL"]
async fn test_ping() {
    let store = store().await;
    store.ping().await.unwrap();
}
