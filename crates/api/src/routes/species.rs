//! Route definitions for the species catalogue.

use axum::routing::get;
use axum::Router;

use crate::handlers::species;
use crate::state::AppState;

/// Species routes mounted at `/species`.
///
/// ```text
/// GET    /               -> list_species
/// POST   /               -> create_species
/// GET    /cards          -> list_cards
/// GET    /{id}           -> get_species
/// PUT    /{id}           -> update_species
/// GET    /{id}/detail    -> get_species_detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(species::list_species).post(species::create_species))
        .route("/cards", get(species::list_cards))
        .route(
            "/{id}",
            get(species::get_species).put(species::update_species),
        )
        .route("/{id}/detail", get(species::get_species_detail))
}
