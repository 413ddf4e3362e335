//! Edit session state machine
//!
//! Mirrors one remote entity into a local draft, applies field mutations,
//! submits, and reconciles server-side validation failures into the same
//! field-keyed shape the client-side prechecks produce.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_lib::CatalogApi;
use catalog_lib::error::Error;
use catalog_lib::error::ValidationErrors;
use catalog_lib::model::Category;
use catalog_lib::model::CategoryDraft;
use catalog_lib::model::Draft;
use catalog_lib::model::Item;
use catalog_lib::model::ItemDraft;
use log::debug;
use log::warn;

use crate::nav::Route;

/// Message recorded for a required field that fails the creation precheck.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Binds an entity type to the store calls and routes its editor needs.
#[async_trait]
pub trait Editable: Sized + Send + Sync + 'static {
    type Draft: Draft;

    /// The entity's server-assigned identifier.
    fn id(&self) -> &str;

    /// Seeds a draft mirroring this record's editable fields.
    fn seed(&self) -> Self::Draft;

    async fn fetch(api: &dyn CatalogApi, id: &str) -> Result<Self, Error>;

    async fn create(api: &dyn CatalogApi, draft: &Self::Draft) -> Result<Self, Error>;

    async fn update(api: &dyn CatalogApi, id: &str, draft: &Self::Draft) -> Result<Self, Error>;

    /// Where the router should go once a save lands.
    fn saved_route(saved: &Self, target: &EditTarget) -> Route;
}

/// What the session writes back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// A new entity; submit issues a create.
    Create,
    /// An existing entity; submit issues a full-field update.
    Existing(String),
}

/// Lifecycle of an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// Draft not yet populated; mutations and submits are refused.
    Loading,
    /// Draft mirrors the remote entity (or creation defaults) and accepts
    /// field mutations.
    Ready,
    /// A save is in flight; further submits are refused.
    Submitting,
    /// The save landed and the draft is done; the view navigates away.
    Saved,
}

/// Result of a submit attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; the router should navigate to the carried route.
    Saved(Route),
    /// Validation failed (locally or server-side); errors are recorded on
    /// the session and every draft value is preserved.
    Rejected,
    /// The session was not ready to submit (still loading, already
    /// submitting, or already saved).
    Ignored,
}

/// A per-view editing session over one entity.
///
/// Constructed on view entry, discarded on navigation away. The draft is a
/// copy — the canonical record stays on the server until a submit lands.
pub struct EditSession<E: Editable> {
    api: Arc<dyn CatalogApi>,
    target: EditTarget,
    state: EditState,
    draft: E::Draft,
    errors: ValidationErrors,
    dirty: BTreeSet<&'static str>,
}

impl<E: Editable> EditSession<E> {
    /// Opens a creation session with empty defaults, immediately ready.
    pub fn create(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            target: EditTarget::Create,
            state: EditState::Ready,
            draft: E::Draft::default(),
            errors: ValidationErrors::new(),
            dirty: BTreeSet::new(),
        }
    }

    /// Opens an edit session for `id`; call [`load`](Self::load) to populate
    /// the draft.
    pub fn edit(api: Arc<dyn CatalogApi>, id: impl Into<String>) -> Self {
        Self {
            api,
            target: EditTarget::Existing(id.into()),
            state: EditState::Loading,
            draft: E::Draft::default(),
            errors: ValidationErrors::new(),
            dirty: BTreeSet::new(),
        }
    }

    /// Opens an edit session seeded from an already fetched record (a loader
    /// payload), skipping the fetch.
    pub fn resume(api: Arc<dyn CatalogApi>, entity: &E) -> Self {
        Self {
            api,
            target: EditTarget::Existing(entity.id().to_owned()),
            state: EditState::Ready,
            draft: entity.seed(),
            errors: ValidationErrors::new(),
            dirty: BTreeSet::new(),
        }
    }

    /// Fetches the target entity and seeds the draft.
    ///
    /// On failure the session stays in [`EditState::Loading`] with a
    /// non-field error recorded: an unpopulated draft must never be
    /// submittable.
    pub async fn load(&mut self) -> Result<(), Error> {
        let EditTarget::Existing(id) = &self.target else {
            return Ok(());
        };

        match E::fetch(self.api.as_ref(), id).await {
            Ok(entity) => {
                self.draft = entity.seed();
                self.dirty.clear();
                self.errors = ValidationErrors::new();
                self.state = EditState::Ready;
                Ok(())
            }
            Err(error) => {
                self.errors = ValidationErrors::non_field(error.to_string());
                Err(error)
            }
        }
    }

    /// Replaces the value of exactly one draft field.
    ///
    /// Refused (returning `false`) while the draft is unpopulated, a submit
    /// is in flight, or the save already landed.
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        if self.state != EditState::Ready {
            return false;
        }
        let Some(name) = E::Draft::FIELDS.iter().find(|&&name| name == field) else {
            return false;
        };
        if !self.draft.set(field, value) {
            return false;
        }
        self.dirty.insert(name);
        true
    }

    /// Submits the draft.
    ///
    /// Creation first runs the client-side required-field precheck and
    /// short-circuits without any network call when it fails. Server-side
    /// field failures replace the recorded errors wholesale and keep every
    /// typed value; failures without a usable field map surface as a single
    /// non-field message.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state != EditState::Ready {
            debug!("edit: submit ignored in {:?}", self.state);
            return SubmitOutcome::Ignored;
        }

        if self.target == EditTarget::Create {
            let missing = self.draft.missing_required();
            if !missing.is_empty() {
                let mut errors = ValidationErrors::new();
                for field in missing {
                    errors.insert(field, REQUIRED_MESSAGE);
                }
                self.errors = errors;
                return SubmitOutcome::Rejected;
            }
        }

        self.state = EditState::Submitting;
        let result = match &self.target {
            EditTarget::Create => E::create(self.api.as_ref(), &self.draft).await,
            EditTarget::Existing(id) => E::update(self.api.as_ref(), id, &self.draft).await,
        };

        match result {
            Ok(saved) => {
                self.errors = ValidationErrors::new();
                self.state = EditState::Saved;
                SubmitOutcome::Saved(E::saved_route(&saved, &self.target))
            }
            Err(error) => {
                warn!("edit: submit failed: {error}");
                self.errors = match error.validation() {
                    Some(errors) => errors.clone(),
                    None => ValidationErrors::non_field(error.to_string()),
                };
                self.state = EditState::Ready;
                SubmitOutcome::Rejected
            }
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    /// The current draft.
    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    /// The current value of one draft field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.draft.get(name)
    }

    /// The recorded validation errors (empty when none).
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// `true` once any field was edited; backs the discard warning only.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

// =============================================================================
// Editable bindings
// =============================================================================

#[async_trait]
impl Editable for Item {
    type Draft = ItemDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(&self) -> ItemDraft {
        self.to_draft()
    }

    async fn fetch(api: &dyn CatalogApi, id: &str) -> Result<Self, Error> {
        api.get_item(id).await
    }

    async fn create(api: &dyn CatalogApi, draft: &ItemDraft) -> Result<Self, Error> {
        api.create_item(draft).await
    }

    async fn update(api: &dyn CatalogApi, id: &str, draft: &ItemDraft) -> Result<Self, Error> {
        api.update_item(id, draft).await
    }

    fn saved_route(_saved: &Self, _target: &EditTarget) -> Route {
        Route::Items
    }
}

#[async_trait]
impl Editable for Category {
    type Draft = CategoryDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(&self) -> CategoryDraft {
        self.to_draft()
    }

    async fn fetch(api: &dyn CatalogApi, id: &str) -> Result<Self, Error> {
        api.get_category(id).await
    }

    async fn create(api: &dyn CatalogApi, draft: &CategoryDraft) -> Result<Self, Error> {
        api.create_category(draft).await
    }

    async fn update(api: &dyn CatalogApi, id: &str, draft: &CategoryDraft) -> Result<Self, Error> {
        api.update_category(id, draft).await
    }

    fn saved_route(_saved: &Self, target: &EditTarget) -> Route {
        match target {
            EditTarget::Create => Route::Categories,
            EditTarget::Existing(id) => Route::Category(id.clone()),
        }
    }
}
