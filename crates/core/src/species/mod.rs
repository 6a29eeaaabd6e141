//! The species record and everything that reads or writes it.
//!
//! - [`kingdom`] -- the fixed six-value kingdom enumeration.
//! - [`schema`] -- raw form input, normalization, and field validation.
//! - [`card`] -- compact gallery summaries.
//! - [`detail`] -- read-only label/value presentation.
//! - [`edit`] -- the edit dialog state machine and its collaborators.

pub mod card;
pub mod detail;
pub mod edit;
pub mod kingdom;
pub mod schema;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub use kingdom::Kingdom;
pub use schema::{SpeciesDraft, SpeciesField, SpeciesFields};

/// Notification title shown when a non-author tries to edit a species.
pub const NOT_AUTHOR_MESSAGE: &str = "You must be the creator of this species";

/// A catalogued species as seen by the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: DbId,
    /// Id of the user allowed to edit this record.
    pub author: DbId,
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub description: Option<String>,
    pub total_population: Option<i64>,
    pub image: Option<String>,
}

impl SpeciesRecord {
    /// Overwrite every mutable field with already-normalized values.
    pub fn apply(&mut self, fields: &SpeciesFields) {
        self.scientific_name = fields.scientific_name.clone();
        self.common_name = fields.common_name.clone();
        self.kingdom = fields.kingdom;
        self.description = fields.description.clone();
        self.total_population = fields.total_population;
        self.image = fields.image.clone();
    }
}

/// Only the author of a record may mutate it.
pub fn ensure_author(acting_user: DbId, record: &SpeciesRecord) -> Result<(), CoreError> {
    if acting_user == record.author {
        Ok(())
    } else {
        Err(CoreError::Forbidden(NOT_AUTHOR_MESSAGE.to_string()))
    }
}
