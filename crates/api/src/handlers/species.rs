//! Handlers for the species catalogue.
//!
//! Listing, cards, and detail are public. Creating and editing require
//! authentication via [`AuthUser`], and edits are limited to the record's
//! author.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use biohub_core::error::CoreError;
use biohub_core::species::card::load_gallery;
use biohub_core::species::detail::SpeciesDetail;
use biohub_core::species::edit::{EditSpeciesDialog, Notifier, SubmitOutcome, Toast};
use biohub_core::species::schema::validate_species;
use biohub_core::species::{SpeciesDraft, SpeciesRecord, NOT_AUTHOR_MESSAGE};
use biohub_core::types::DbId;
use biohub_db::models::species::Species;
use biohub_db::repositories::SpeciesRepo;
use biohub_db::store::PgSpeciesStore;
use biohub_events::{HubEvent, SPECIES_CREATED, SPECIES_REFRESH};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_species(state: &AppState, id: DbId) -> AppResult<Species> {
    SpeciesRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Species",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/species
pub async fn list_species(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let species = SpeciesRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: species }))
}

/// GET /api/v1/species/cards
///
/// Gallery summaries with the truncated description preview.
pub async fn list_cards(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let store = PgSpeciesStore::new(state.pool.clone());
    let cards = load_gallery(&store)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(Json(DataResponse { data: cards }))
}

// ---------------------------------------------------------------------------
// Single record
// ---------------------------------------------------------------------------

/// GET /api/v1/species/{id}
pub async fn get_species(
    State(state): State<AppState>,
    Path(species_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let species = find_species(&state, species_id).await?;

    Ok(Json(DataResponse { data: species }))
}

/// GET /api/v1/species/{id}/detail
///
/// The labelled rows shown by the read-only view dialog.
pub async fn get_species_detail(
    State(state): State<AppState>,
    Path(species_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = SpeciesRecord::from(find_species(&state, species_id).await?);

    Ok(Json(DataResponse {
        data: SpeciesDetail::from_record(&record),
    }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/species
///
/// Create a species authored by the caller.
pub async fn create_species(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(draft): Json<SpeciesDraft>,
) -> AppResult<impl IntoResponse> {
    let fields = validate_species(&draft)?;
    let species = SpeciesRepo::create(&state.pool, auth.user_id, &fields).await?;

    tracing::info!(
        species_id = species.id,
        user_id = auth.user_id,
        kingdom = %species.kingdom,
        "Species created",
    );

    state.event_bus.publish(
        HubEvent::new(SPECIES_CREATED)
            .with_species(species.id)
            .with_actor(auth.user_id),
    );
    state.event_bus.publish(
        HubEvent::new(SPECIES_REFRESH)
            .with_species(species.id)
            .with_actor(auth.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: species })))
}

/// PUT /api/v1/species/{id}
///
/// Replace every mutable field of a species. Only its author may do this;
/// anyone else gets 403 and the row is left untouched. The request drives
/// the same [`EditSpeciesDialog`] as interactive edits, with
/// [`PgSpeciesStore`] doing the write and the event bus the refresh.
pub async fn update_species(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(species_id): Path<DbId>,
    Json(draft): Json<SpeciesDraft>,
) -> AppResult<impl IntoResponse> {
    let existing = SpeciesRecord::from(find_species(&state, species_id).await?);

    let mut dialog = EditSpeciesDialog::new(existing);
    dialog.open();
    dialog.fill(draft);

    let store = PgSpeciesStore::new(state.pool.clone());
    let outcome = dialog
        .submit(auth.user_id, &store, state.event_bus.as_ref(), &LogNotifier)
        .await;

    match outcome {
        SubmitOutcome::Saved(_) => {}
        SubmitOutcome::Invalid(errors) => return Err(errors.into()),
        SubmitOutcome::Forbidden => {
            tracing::warn!(
                species_id,
                user_id = auth.user_id,
                author = dialog.record().author,
                "Rejected species edit by non-author",
            );
            return Err(CoreError::Forbidden(NOT_AUTHOR_MESSAGE.into()).into());
        }
        // The write is scoped to the author, so a row whose author changed
        // since it was loaded is refused here.
        SubmitOutcome::Failed(err) if err.rejected => {
            return Err(CoreError::Forbidden(NOT_AUTHOR_MESSAGE.into()).into());
        }
        SubmitOutcome::Failed(err) => return Err(AppError::InternalError(err.message)),
        SubmitOutcome::Ignored => {
            return Err(AppError::InternalError(
                "Edit dialog refused the submission".into(),
            ))
        }
    }

    let species = find_species(&state, species_id).await?;

    tracing::info!(species_id, user_id = auth.user_id, "Species edited via API");

    Ok(Json(DataResponse { data: species }))
}

/// Sends dialog toasts to the log; HTTP callers get the error response.
struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        tracing::warn!(title = %toast.title, description = %toast.description, "Species edit rejected");
    }
}
