use async_trait::async_trait;

use crate::{Customer, ImageAsset};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("record not found")]
    NotFound,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Managed database and object storage the edit view talks to.
///
/// Futures are not `Send`: the browser implementation holds JS handles.
#[async_trait(?Send)]
pub trait CustomerBackend {
    /// File handle accepted by [`CustomerBackend::upload_binary`].
    type Upload: 'static;

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Customer>, BackendError>;

    /// Replaces the stored record. Safe to retry.
    async fn update(&self, id: &str, record: &Customer) -> Result<(), BackendError>;

    async fn upload_binary(&self, file: Self::Upload) -> Result<ImageAsset, BackendError>;

    async fn delete_binary(&self, path: &str) -> Result<(), BackendError>;
}
