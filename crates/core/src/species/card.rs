//! Gallery card summaries.

use serde::Serialize;

use super::edit::{SpeciesStore, StoreError};
use super::SpeciesRecord;
use crate::types::DbId;

/// Number of description characters shown on a card.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Appended to every description preview.
pub const ELLIPSIS: &str = "...";

/// Label of the card's action, which opens the detail view.
pub const LEARN_MORE_LABEL: &str = "Learn More";

/// Compact preview of one species for the listing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesCard {
    pub id: DbId,
    /// Only set when the record has an image.
    pub image: Option<String>,
    pub common_name: Option<String>,
    pub scientific_name: String,
    pub description_preview: Option<String>,
    pub action_label: &'static str,
}

impl SpeciesCard {
    pub fn from_record(record: &SpeciesRecord) -> Self {
        Self {
            id: record.id,
            image: record.image.clone(),
            common_name: record.common_name.clone(),
            scientific_name: record.scientific_name.clone(),
            description_preview: description_preview(record.description.as_deref()),
            action_label: LEARN_MORE_LABEL,
        }
    }
}

/// First [`DESCRIPTION_PREVIEW_CHARS`] characters of the trimmed description,
/// followed by [`ELLIPSIS`]. Blank or missing descriptions yield `None`.
pub fn description_preview(description: Option<&str>) -> Option<String> {
    let trimmed = description.map(str::trim).filter(|d| !d.is_empty())?;
    let head: String = trimmed.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    Some(format!("{}{ELLIPSIS}", head.trim_end()))
}

/// Fetch the full collection and summarize it, preserving store order.
pub async fn load_gallery<S>(store: &S) -> Result<Vec<SpeciesCard>, StoreError>
where
    S: SpeciesStore + ?Sized,
{
    let records = store.list_species().await?;
    Ok(records.iter().map(SpeciesCard::from_record).collect())
}
