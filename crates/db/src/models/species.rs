//! Species entity model.

use biohub_core::species::{Kingdom, SpeciesRecord};
use biohub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `species` table.
///
/// Inserts and updates take already-normalized
/// [`SpeciesFields`](biohub_core::species::SpeciesFields) rather than a
/// separate DTO, so nothing reaches the table without passing the schema.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Species {
    pub id: DbId,
    pub author: DbId,
    pub scientific_name: String,
    pub common_name: Option<String>,
    #[sqlx(try_from = "String")]
    pub kingdom: Kingdom,
    pub description: Option<String>,
    pub total_population: Option<i64>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Species> for SpeciesRecord {
    fn from(row: Species) -> Self {
        Self {
            id: row.id,
            author: row.author,
            scientific_name: row.scientific_name,
            common_name: row.common_name,
            kingdom: row.kingdom,
            description: row.description,
            total_population: row.total_population,
            image: row.image,
        }
    }
}
