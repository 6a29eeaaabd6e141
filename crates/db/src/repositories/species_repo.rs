//! Repository for the `species` table.

use biohub_core::species::SpeciesFields;
use biohub_core::types::DbId;
use sqlx::PgPool;

use crate::models::species::Species;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author, scientific_name, common_name, kingdom, description, \
                       total_population, image, created_at, updated_at";

pub struct SpeciesRepo;

impl SpeciesRepo {
    /// Insert a species authored by `author`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author: DbId,
        fields: &SpeciesFields,
    ) -> Result<Species, sqlx::Error> {
        let query = format!(
            "INSERT INTO species
                (author, scientific_name, common_name, kingdom, description, total_population, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Species>(&query)
            .bind(author)
            .bind(&fields.scientific_name)
            .bind(&fields.common_name)
            .bind(fields.kingdom.as_str())
            .bind(&fields.description)
            .bind(fields.total_population)
            .bind(&fields.image)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Species>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM species WHERE id = $1");
        sqlx::query_as::<_, Species>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The full collection, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Species>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM species ORDER BY id");
        sqlx::query_as::<_, Species>(&query).fetch_all(pool).await
    }

    /// Replace every mutable field of a species.
    ///
    /// The row must belong to `author`; returns `None` when no row with that
    /// `id` and `author` exists. Unlike a patch, `None` fields clear columns.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        author: DbId,
        fields: &SpeciesFields,
    ) -> Result<Option<Species>, sqlx::Error> {
        let query = format!(
            "UPDATE species SET
                scientific_name = $3,
                common_name = $4,
                kingdom = $5,
                description = $6,
                total_population = $7,
                image = $8
             WHERE id = $1 AND author = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Species>(&query)
            .bind(id)
            .bind(author)
            .bind(&fields.scientific_name)
            .bind(&fields.common_name)
            .bind(fields.kingdom.as_str())
            .bind(&fields.description)
            .bind(fields.total_population)
            .bind(&fields.image)
            .fetch_optional(pool)
            .await
    }
}
