//! Edit-species dialog state machine and the collaborators it drives.
//!
//! ```text
//! Closed --open--> Editing --submit--> Submitting --ok--> Closed
//!                  ^  |  ^                  |
//!                  |  |  +------error-------+
//!                  |  +--invalid / not author (stays Editing)
//!                  +--cancel--> Closed
//! ```
//!
//! A submit that is dropped while `Submitting` falls back to `Editing`.
//!
//! Validation and the author check both run before any persistence call, so
//! a rejected submit never reaches the [`SpeciesStore`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use super::schema::{validate_field, validate_species, FieldViolation, SchemaErrors};
use super::{
    ensure_author, SpeciesDraft, SpeciesField, SpeciesFields, SpeciesRecord, NOT_AUTHOR_MESSAGE,
};
use crate::types::DbId;

/// Description attached to the not-the-author notification.
pub const NOT_AUTHOR_DESCRIPTION: &str = "Only the author of a species can edit it.";

/// Title attached to persistence failure notifications.
pub const SAVE_FAILED_TITLE: &str = "Something went wrong.";

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Failure reported by a [`SpeciesStore`], carrying a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
    /// The store refused this write (no such record for this author), as
    /// opposed to failing to reach the backend.
    pub rejected: bool,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rejected: false,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rejected: true,
        }
    }
}

/// Remote persistence for species records.
#[async_trait]
pub trait SpeciesStore: Send + Sync {
    /// Every species, in listing order.
    async fn list_species(&self) -> Result<Vec<SpeciesRecord>, StoreError>;

    /// Replace the mutable fields of record `id`.
    ///
    /// Implementations must also refuse the write unless `author` owns the
    /// record; the dialog's own check is not a security boundary.
    async fn update_species(
        &self,
        id: DbId,
        author: DbId,
        fields: &SpeciesFields,
    ) -> Result<(), StoreError>;
}

/// Asks listings to re-fetch after a successful write.
pub trait RefreshSignal {
    fn request_refresh(&self, species_id: DbId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

pub trait Notifier {
    fn notify(&self, toast: Toast);
}

// ---------------------------------------------------------------------------
// Dialog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Editing,
    Submitting,
}

/// What a call to [`EditSpeciesDialog::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted, refresh requested, dialog closed.
    Saved(SpeciesFields),
    /// Schema failed; errors are on the form.
    Invalid(SchemaErrors),
    /// Acting user is not the author; nothing was sent.
    Forbidden,
    /// The store rejected the write; dialog stays open for retry.
    Failed(StoreError),
    /// Dialog was not in a submittable state.
    Ignored,
}

/// Form state for editing one species the acting user authored.
#[derive(Debug, Clone)]
pub struct EditSpeciesDialog {
    record: SpeciesRecord,
    state: DialogState,
    form: SpeciesDraft,
    errors: BTreeMap<SpeciesField, FieldViolation>,
}

impl EditSpeciesDialog {
    pub fn new(record: SpeciesRecord) -> Self {
        Self {
            form: SpeciesDraft::from(&record),
            record,
            state: DialogState::Closed,
            errors: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn record(&self) -> &SpeciesRecord {
        &self.record
    }

    pub fn form(&self) -> &SpeciesDraft {
        &self.form
    }

    pub fn field_error(&self, field: SpeciesField) -> Option<&FieldViolation> {
        self.errors.get(&field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Load the form from the record's current values and show the dialog.
    pub fn open(&mut self) {
        if self.state != DialogState::Closed {
            return;
        }
        self.form = SpeciesDraft::from(&self.record);
        self.errors.clear();
        self.state = DialogState::Editing;
    }

    /// Swap in a freshly fetched record. Ignored while the dialog is open.
    pub fn replace_record(&mut self, record: SpeciesRecord) {
        if self.state == DialogState::Closed {
            self.form = SpeciesDraft::from(&record);
            self.record = record;
        }
    }

    /// Change one field and re-run its validation.
    pub fn set_field(&mut self, field: SpeciesField, value: Option<String>) {
        if self.state != DialogState::Editing {
            return;
        }
        self.form.set(field, value);
        match validate_field(&self.form, field) {
            Some(violation) => {
                self.errors.insert(field, violation);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Replace the whole form at once and re-run every field's validation.
    pub fn fill(&mut self, draft: SpeciesDraft) {
        if self.state != DialogState::Editing {
            return;
        }
        self.form = draft;
        self.errors = SpeciesField::ALL
            .iter()
            .filter_map(|&field| validate_field(&self.form, field).map(|v| (field, v)))
            .collect();
    }

    /// Discard in-progress edits and close.
    pub fn cancel(&mut self) {
        if self.state != DialogState::Editing {
            return;
        }
        self.form = SpeciesDraft::from(&self.record);
        self.errors.clear();
        self.state = DialogState::Closed;
    }

    /// Validate, check authorship, then persist.
    pub async fn submit<S, R, N>(
        &mut self,
        acting_user: DbId,
        store: &S,
        refresh: &R,
        notifier: &N,
    ) -> SubmitOutcome
    where
        S: SpeciesStore + ?Sized,
        R: RefreshSignal + ?Sized,
        N: Notifier + ?Sized,
    {
        if self.state != DialogState::Editing {
            return SubmitOutcome::Ignored;
        }

        let fields = match validate_species(&self.form) {
            Ok(fields) => fields,
            Err(errors) => {
                self.errors = errors
                    .violations
                    .iter()
                    .map(|v| (v.field, v.clone()))
                    .collect();
                return SubmitOutcome::Invalid(errors);
            }
        };
        self.errors.clear();

        if ensure_author(acting_user, &self.record).is_err() {
            notifier.notify(Toast::destructive(
                NOT_AUTHOR_MESSAGE,
                NOT_AUTHOR_DESCRIPTION,
            ));
            return SubmitOutcome::Forbidden;
        }

        let id = self.record.id;
        let in_flight = InFlight::begin(&mut self.state);

        match store.update_species(id, acting_user, &fields).await {
            Ok(()) => {
                self.form = SpeciesDraft::from(&fields);
                self.record.apply(&fields);
                refresh.request_refresh(id);
                in_flight.finish(DialogState::Closed);
                SubmitOutcome::Saved(fields)
            }
            Err(err) => {
                notifier.notify(Toast::destructive(SAVE_FAILED_TITLE, err.message.clone()));
                in_flight.finish(DialogState::Editing);
                SubmitOutcome::Failed(err)
            }
        }
    }
}

/// Holds the dialog in `Submitting` for the duration of a store call.
///
/// Dropping it unfinished, e.g. when the submit future is cancelled, puts
/// the dialog back into `Editing` so it can be retried or cancelled.
struct InFlight<'a> {
    state: &'a mut DialogState,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut DialogState) -> Self {
        *state = DialogState::Submitting;
        Self { state }
    }

    fn finish(self, next: DialogState) {
        *self.state = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if *self.state == DialogState::Submitting {
            *self.state = DialogState::Editing;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
