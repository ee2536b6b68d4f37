//! Customer edit view: lifecycle state, local edits, and the calls that reach
//! the backend on the user's behalf.
//!
//! The view starts in [`EditState::Loading`] and settles once into `Ready` or
//! `Error`. Local edits are [`EditAction`]s applied through
//! [`EditState::reduce`]; actions other than `Settle` are ignored unless the
//! state is `Ready`. The async functions below never touch view state
//! themselves, they return what the caller should dispatch.

use futures::future::join_all;

use crate::backend::{BackendError, CustomerBackend};
use crate::{Customer, ImageAsset};

/// Where the view goes after a successful save or when the user backs out.
pub const LISTING_PATH: &str = "/customers";

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this image? This action cannot be undone.";

pub const SAVED_NOTICE: &str = "Customer updated successfully";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Invalid customer UUID.")]
    MissingId,
    #[error("Customer not found or invalid UUID.")]
    NotFound,
    #[error("Error fetching customer data.")]
    Fetch(#[source] BackendError),
    #[error("Failed to upload images. Please try again.")]
    Upload(#[source] BackendError),
    #[error("No image at position {0}.")]
    NoSuchImage(usize),
    #[error("Failed to delete image. Please try again.")]
    Delete(#[source] BackendError),
    #[error("Error updating customer. Please try again.")]
    Save(#[source] BackendError),
}

/// Editable copy of one customer record.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    id: String,
    original: Customer,
    images: Vec<ImageAsset>,
    preview: Option<String>,
}

impl EditSession {
    pub fn new(id: impl Into<String>, record: Customer) -> Self {
        let images = record.images.clone();
        Self {
            id: id.into(),
            original: record,
            images,
            preview: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The record as fetched. Fields other than `images` are read-only here.
    pub fn original(&self) -> &Customer {
        &self.original
    }

    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// The fetched record with its image list replaced by the local one.
    pub fn merged_record(&self) -> Customer {
        Customer {
            images: self.images.clone(),
            ..self.original.clone()
        }
    }

    fn apply(&mut self, action: EditAction) {
        match action {
            EditAction::Settle(_) => {}
            EditAction::AppendImages(assets) => self.images.extend(assets),
            EditAction::RemoveImage { index, url } => {
                // Uploads may have landed since the delete started; fall back to the URL.
                let at = match self.images.get(index) {
                    Some(asset) if asset.url == url => Some(index),
                    _ => self.images.iter().position(|asset| asset.url == url),
                };
                if let Some(at) = at {
                    self.images.remove(at);
                }
            }
            EditAction::OpenPreview(url) => self.preview = Some(url),
            EditAction::ClosePreview => self.preview = None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    #[default]
    Loading,
    Ready(EditSession),
    Error(EditError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// Replaces the whole state; used once the fetch resolves.
    Settle(EditState),
    AppendImages(Vec<ImageAsset>),
    RemoveImage { index: usize, url: String },
    OpenPreview(String),
    ClosePreview,
}

impl EditState {
    pub fn reduce(self, action: EditAction) -> EditState {
        match (self, action) {
            (_, EditAction::Settle(next)) => next,
            (EditState::Ready(mut session), action) => {
                session.apply(action);
                EditState::Ready(session)
            }
            (state, _) => state,
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        match self {
            EditState::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, EditState::Loading)
    }
}

/// Whether `id` can name a record. Identifiers are opaque but travel in a
/// query string and a URL path segment.
pub fn is_well_formed_id(id: &str) -> bool {
    !id.is_empty()
        && !id
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '%'))
}

pub async fn load<B>(backend: &B, id: Option<&str>) -> EditState
where
    B: CustomerBackend + ?Sized,
{
    let Some(id) = id.filter(|id| is_well_formed_id(id)) else {
        return EditState::Error(EditError::MissingId);
    };

    match backend.fetch_by_id(id).await {
        Ok(Some(record)) => EditState::Ready(EditSession::new(id, record)),
        Ok(None) | Err(BackendError::NotFound) => EditState::Error(EditError::NotFound),
        Err(err) => EditState::Error(EditError::Fetch(err)),
    }
}

/// Uploads every file concurrently. Assets come back in selection order; any
/// failure fails the batch, and objects already stored are left in place.
pub async fn upload_images<B>(
    backend: &B,
    files: Vec<B::Upload>,
) -> Result<Vec<ImageAsset>, EditError>
where
    B: CustomerBackend + ?Sized,
{
    join_all(files.into_iter().map(|file| backend.upload_binary(file)))
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(EditError::Upload)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Removed {
        index: usize,
        url: String,
        /// False when no storage path could be resolved.
        remote_deleted: bool,
    },
}

impl DeleteOutcome {
    pub fn into_action(self) -> Option<EditAction> {
        match self {
            DeleteOutcome::Cancelled => None,
            DeleteOutcome::Removed { index, url, .. } => Some(EditAction::RemoveImage { index, url }),
        }
    }
}

/// Confirm, resolve the storage path, delete the remote object if there is a
/// path, then report the entry for local removal.
pub async fn delete_image<B, C>(
    backend: &B,
    session: &EditSession,
    index: usize,
    confirm: C,
) -> Result<DeleteOutcome, EditError>
where
    B: CustomerBackend + ?Sized,
    C: FnOnce() -> bool,
{
    let asset = session
        .images()
        .get(index)
        .ok_or(EditError::NoSuchImage(index))?;

    if !confirm() {
        return Ok(DeleteOutcome::Cancelled);
    }

    let remote_deleted = match asset.storage_path() {
        Some(path) => match backend.delete_binary(&path).await {
            Ok(()) => true,
            Err(err) => return Err(EditError::Delete(err)),
        },
        None => false,
    };

    Ok(DeleteOutcome::Removed {
        index,
        url: asset.url.clone(),
        remote_deleted,
    })
}

/// Persists the merged record and returns the path to navigate to.
pub async fn save<B>(backend: &B, session: &EditSession) -> Result<&'static str, EditError>
where
    B: CustomerBackend + ?Sized,
{
    let record = session.merged_record();
    backend
        .update(session.id(), &record)
        .await
        .map_err(EditError::Save)?;
    Ok(LISTING_PATH)
}
