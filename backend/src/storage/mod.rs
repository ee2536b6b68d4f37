//! Binary object storage backing customer images.
//!
//! Objects live under the upload directory at their storage path and are
//! addressed by URL as `/api/v1/storage/o/<percent-encoded path>`.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::path::{Component, PathBuf};
use std::sync::Arc;
use tokio::fs;
use uuid::Uuid;

use atelier_shared::storage::{object_url, OBJECT_URL_BASE};
use atelier_shared::ImageAsset;

use crate::{ApiResult, AppError, AppState};

const IMAGE_PREFIX: &str = "images";

pub fn storage_routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(upload_object))
        .route("/o/*path", get(download_object).delete(delete_object))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Files on local disk, keyed by relative storage path
#[derive(Debug, Clone)]
pub struct ObjectStore {
    root: PathBuf,
}

impl ObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn put(&self, path: &str, bytes: &[u8]) -> ApiResult<()> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, bytes).await?;
        Ok(())
    }

    pub async fn get(&self, path: &str) -> ApiResult<Vec<u8>> {
        Ok(fs::read(self.resolve(path)?).await?)
    }

    pub async fn remove(&self, path: &str) -> ApiResult<()> {
        fs::remove_file(self.resolve(path)?).await?;
        Ok(())
    }

    fn resolve(&self, path: &str) -> ApiResult<PathBuf> {
        validate_object_path(path)?;
        Ok(self.root.join(path))
    }
}

/// Storage paths are relative, `/`-separated, and made of plain segments only.
pub fn validate_object_path(path: &str) -> ApiResult<()> {
    let invalid = || AppError::BadRequest(format!("Invalid storage path: {:?}", path));

    if path.is_empty() || path.contains('\\') || path.contains('\0') {
        return Err(invalid());
    }
    if path.split('/').any(|segment| segment.is_empty()) {
        return Err(invalid());
    }
    let plain = std::path::Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if plain { Ok(()) } else { Err(invalid()) }
}

/// Lowercased extension of an uploaded file name, if it looks like one.
fn file_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let valid = !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

pub fn content_type_for(path: &str) -> mime::Mime {
    match path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("svg") => mime::IMAGE_SVG,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

async fn upload_object(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("").to_string();
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let (file_name, bytes) = upload
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing or empty `file` field".to_string()))?;

    let object_name = match file_extension(&file_name) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };
    let path = format!("{}/{}", IMAGE_PREFIX, object_name);

    state.objects.put(&path, &bytes).await?;
    tracing::info!(path = %path, size = bytes.len(), original = %file_name, "Object uploaded");

    let asset = ImageAsset::new(object_url(OBJECT_URL_BASE, &path), path);
    Ok((StatusCode::CREATED, Json(asset)))
}

async fn download_object(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let bytes = state.objects.get(&path).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&path).to_string())], bytes))
}

async fn delete_object(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> ApiResult<StatusCode> {
    state.objects.remove(&path).await?;
    tracing::info!(path = %path, "Object deleted");
    Ok(StatusCode::NO_CONTENT)
}
