//! Database-backed [`SpeciesStore`].

use async_trait::async_trait;
use biohub_core::species::edit::{SpeciesStore, StoreError};
use biohub_core::species::{SpeciesFields, SpeciesRecord};
use biohub_core::types::DbId;

use crate::repositories::SpeciesRepo;
use crate::DbPool;

/// Persists edit-dialog submissions straight to PostgreSQL.
#[derive(Clone)]
pub struct PgSpeciesStore {
    pool: DbPool,
}

impl PgSpeciesStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpeciesStore for PgSpeciesStore {
    async fn list_species(&self) -> Result<Vec<SpeciesRecord>, StoreError> {
        let rows = SpeciesRepo::list(&self.pool).await.map_err(store_error)?;
        Ok(rows.into_iter().map(SpeciesRecord::from).collect())
    }

    async fn update_species(
        &self,
        id: DbId,
        author: DbId,
        fields: &SpeciesFields,
    ) -> Result<(), StoreError> {
        match SpeciesRepo::update(&self.pool, id, author, fields)
            .await
            .map_err(store_error)?
        {
            Some(_) => {
                tracing::info!(species_id = id, user_id = author, "Species updated");
                Ok(())
            }
            None => Err(StoreError::rejected(format!(
                "Species {id} does not exist or was not created by you"
            ))),
        }
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Species store query failed");
    StoreError::new(err.to_string())
}
