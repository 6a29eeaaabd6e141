//! Integration tests for the species and user repositories.
//!
//! Exercises the repository layer and `PgSpeciesStore` against a real
//! database:
//! - Create, find, and list species
//! - Author-scoped full updates
//! - CHECK constraints as a backstop for the schema
//! - Unique username constraint

use assert_matches::assert_matches;
use biohub_core::species::edit::SpeciesStore;
use biohub_core::species::{Kingdom, SpeciesFields};
use biohub_db::models::user::CreateUser;
use biohub_db::repositories::{SpeciesRepo, UserRepo};
use biohub_db::store::PgSpeciesStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: None,
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn lion() -> SpeciesFields {
    SpeciesFields {
        scientific_name: "Panthera leo".to_string(),
        common_name: Some("Lion".to_string()),
        kingdom: Kingdom::Animalia,
        description: Some("Large social cat of the savanna.".to_string()),
        total_population: Some(20_000),
        image: None,
    }
}

// ---------------------------------------------------------------------------
// Species CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_species(pool: PgPool) {
    let author = new_user(&pool, "ada").await;

    let created = SpeciesRepo::create(&pool, author, &lion()).await.unwrap();
    assert_eq!(created.author, author);
    assert_eq!(created.kingdom, Kingdom::Animalia);

    let found = SpeciesRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("species should exist");
    assert_eq!(found.scientific_name, "Panthera leo");
    assert_eq!(found.total_population, Some(20_000));
    assert_eq!(found.image, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_is_ordered_by_id(pool: PgPool) {
    let author = new_user(&pool, "ada").await;
    let mut oak = lion();
    oak.scientific_name = "Quercus robur".to_string();
    oak.kingdom = Kingdom::Plantae;

    let first = SpeciesRepo::create(&pool, author, &lion()).await.unwrap();
    let second = SpeciesRepo::create(&pool, author, &oak).await.unwrap();

    let all = SpeciesRepo::list(&pool).await.unwrap();
    let ids: Vec<_> = all.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(all[1].kingdom, Kingdom::Plantae);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_fields_including_clears(pool: PgPool) {
    let author = new_user(&pool, "ada").await;
    let created = SpeciesRepo::create(&pool, author, &lion()).await.unwrap();

    let mut edited = lion();
    edited.common_name = None;
    edited.total_population = None;
    edited.kingdom = Kingdom::Fungi;

    let updated = SpeciesRepo::update(&pool, created.id, author, &edited)
        .await
        .unwrap()
        .expect("author should be able to update");
    assert_eq!(updated.common_name, None);
    assert_eq!(updated.total_population, None);
    assert_eq!(updated.kingdom, Kingdom::Fungi);
    assert_eq!(updated.author, author);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_by_non_author_touches_nothing(pool: PgPool) {
    let author = new_user(&pool, "ada").await;
    let other = new_user(&pool, "grace").await;
    let created = SpeciesRepo::create(&pool, author, &lion()).await.unwrap();

    let mut edited = lion();
    edited.scientific_name = "Hijacked".to_string();

    let result = SpeciesRepo::update(&pool, created.id, other, &edited)
        .await
        .unwrap();
    assert!(result.is_none());

    let unchanged = SpeciesRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.scientific_name, "Panthera leo");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_check_constraints_reject_unnormalized_rows(pool: PgPool) {
    let author = new_user(&pool, "ada").await;

    let mut blank_name = lion();
    blank_name.scientific_name = "   ".to_string();
    assert!(SpeciesRepo::create(&pool, author, &blank_name).await.is_err());

    let mut zero = lion();
    zero.total_population = Some(0);
    assert!(SpeciesRepo::create(&pool, author, &zero).await.is_err());

    let mut empty_common = lion();
    empty_common.common_name = Some(String::new());
    assert!(SpeciesRepo::create(&pool, author, &empty_common).await.is_err());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_is_rejected(pool: PgPool) {
    new_user(&pool, "ada").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "ada".to_string(),
            display_name: None,
            password_hash: "x".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, sqlx::Error::Database(db) if db.constraint() == Some("uq_users_username"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_user_by_username(pool: PgPool) {
    let id = new_user(&pool, "ada").await;
    let user = UserRepo::find_by_username(&pool, "ada")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id, id);
    assert!(UserRepo::find_by_username(&pool, "ADA").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// PgSpeciesStore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_store_lists_records_and_updates_for_author(pool: PgPool) {
    let author = new_user(&pool, "ada").await;
    let created = SpeciesRepo::create(&pool, author, &lion()).await.unwrap();
    let store = PgSpeciesStore::new(pool.clone());

    let records = store.list_species().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, created.id);
    assert_eq!(records[0].author, author);

    let mut edited = lion();
    edited.description = None;
    store
        .update_species(created.id, author, &edited)
        .await
        .unwrap();
    let row = SpeciesRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.description, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_store_refuses_non_author(pool: PgPool) {
    let author = new_user(&pool, "ada").await;
    let other = new_user(&pool, "grace").await;
    let created = SpeciesRepo::create(&pool, author, &lion()).await.unwrap();
    let store = PgSpeciesStore::new(pool);

    let err = store
        .update_species(created.id, other, &lion())
        .await
        .unwrap_err();
    assert!(err.rejected);
    assert!(err.message.contains("not created by you"));
}
