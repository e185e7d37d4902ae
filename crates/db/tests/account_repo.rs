//! Integration tests for the account repository.
//!
//! Exercises the repository layer against a real SQLite database:
//! - Create and look up by row id, public id, and username
//! - Unique username constraint
//! - Partial updates
//! - Cascade delete of owned movies and tasks

use cinelog_db::models::account::{CreateAccount, UpdateAccount};
use cinelog_db::models::movie::CreateMovie;
use cinelog_db::models::task::CreateTask;
use cinelog_db::repositories::{AccountRepo, MovieRepo, TaskRepo};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_account(username: &str) -> CreateAccount {
    CreateAccount {
        username: username.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        fullname: format!("{username} tester"),
        is_admin: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_account(pool: SqlitePool) {
    let created = AccountRepo::create(&pool, &new_account("alice")).await.unwrap();

    assert_eq!(created.username, "alice");
    assert!(!created.is_admin);
    assert_eq!(created.created_at, created.updated_at);

    let by_id = AccountRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(by_id.public_id, created.public_id);

    let by_public = AccountRepo::find_by_public_id(&pool, created.public_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_public.id, created.id);

    let by_name = AccountRepo::find_by_username(&pool, "alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);

    assert!(AccountRepo::find_by_username(&pool, "Alice").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_ids_are_distinct(pool: SqlitePool) {
    let a = AccountRepo::create(&pool, &new_account("a")).await.unwrap();
    let b = AccountRepo::create(&pool, &new_account("b")).await.unwrap();

    assert_ne!(a.public_id, b.public_id);
    assert_eq!(a.public_id.get_version_num(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_is_rejected(pool: SqlitePool) {
    AccountRepo::create(&pool, &new_account("dup")).await.unwrap();
    let err = AccountRepo::create(&pool, &new_account("dup")).await.unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_applies_only_given_fields(pool: SqlitePool) {
    let created = AccountRepo::create(&pool, &new_account("bob")).await.unwrap();

    let input = UpdateAccount {
        fullname: Some("Robert".to_string()),
        ..Default::default()
    };
    let updated = AccountRepo::update(&pool, created.id, &input).await.unwrap().unwrap();

    assert_eq!(updated.fullname, "Robert");
    assert_eq!(updated.password_hash, created.password_hash);
    assert!(!updated.is_admin);
    assert!(updated.updated_at >= created.updated_at);

    let missing = AccountRepo::update(&pool, 9999, &input).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascades_to_owned_rows(pool: SqlitePool) {
    let owner = AccountRepo::create(&pool, &new_account("owner")).await.unwrap();
    let other = AccountRepo::create(&pool, &new_account("other")).await.unwrap();

    let movie = CreateMovie {
        genre: "Drama".to_string(),
        title: "Stalker".to_string(),
        directors: "Andrei Tarkovsky".to_string(),
        actors: "Alisa Freindlich".to_string(),
        year: "1979".to_string(),
    };
    MovieRepo::create(&pool, owner.id, &movie).await.unwrap();
    MovieRepo::create(&pool, other.id, &movie).await.unwrap();
    TaskRepo::create(&pool, owner.id, &CreateTask { title: "rewatch".into() })
        .await
        .unwrap();

    assert!(AccountRepo::delete(&pool, owner.id).await.unwrap());
    assert!(!AccountRepo::delete(&pool, owner.id).await.unwrap());

    let (movies,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (tasks,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(movies, 1, "only the other account's movie should remain");
    assert_eq!(tasks, 0);
}
