// API service layer for communicating with backend
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use atelier_shared::{BackendError, Customer, CustomerBackend, ImageAsset};

const API_BASE_URL: &str = "/api/v1";

// ============================================
// ERROR HANDLING
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn local(message: impl ToString, code: &str) -> Self {
        ApiError {
            message: message.to_string(),
            code: Some(code.to_string()),
            status: None,
        }
    }
}

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err.status {
            Some(404) => BackendError::NotFound,
            Some(status) => BackendError::Rejected {
                status,
                message: err.message,
            },
            None => BackendError::Transport(err.message),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// HTTP CLIENT
// ============================================

pub struct ApiClient;

impl ApiClient {
    fn builder(method: &str, endpoint: &str) -> ApiResult<RequestBuilder> {
        let url = format!("{}{}", API_BASE_URL, endpoint);

        match method {
            "GET" => Ok(Request::get(&url)),
            "POST" => Ok(Request::post(&url)),
            "PUT" => Ok(Request::put(&url)),
            "DELETE" => Ok(Request::delete(&url)),
            _ => Err(ApiError::local("Invalid method", "INVALID_METHOD")),
        }
    }

    async fn check(sent: Result<Response, gloo_net::Error>) -> ApiResult<Response> {
        let response = sent.map_err(|e| ApiError::local(e, "NETWORK_ERROR"))?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let mut error = response.json::<ApiError>().await.unwrap_or(ApiError {
            message: format!("HTTP Error: {}", status),
            code: Some(format!("HTTP_{}", status)),
            status: None,
        });
        error.status = Some(status);
        Err(error)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::local(e, "PARSE_ERROR"))
    }

    // GET request
    pub async fn get<T: DeserializeOwned>(endpoint: &str) -> ApiResult<T> {
        let response = Self::check(Self::builder("GET", endpoint)?.send().await).await?;
        Self::parse(response).await
    }

    // PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(endpoint: &str, body: &B) -> ApiResult<T> {
        let request = Self::builder("PUT", endpoint)?
            .json(body)
            .map_err(|e| ApiError::local(e, "SERIALIZE_ERROR"))?;
        let response = Self::check(request.send().await).await?;
        Self::parse(response).await
    }

    // DELETE request; the response carries no body
    pub async fn delete(endpoint: &str) -> ApiResult<()> {
        Self::check(Self::builder("DELETE", endpoint)?.send().await).await?;
        Ok(())
    }

    // Multipart upload of a single file under the `file` field
    pub async fn upload<T: DeserializeOwned>(endpoint: &str, file: &web_sys::File) -> ApiResult<T> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::local(format!("{:?}", e), "FORM_ERROR"))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ApiError::local(format!("{:?}", e), "FORM_ERROR"))?;

        let request = Self::builder("POST", endpoint)?
            .body(form)
            .map_err(|e| ApiError::local(e, "FORM_ERROR"))?;
        let response = Self::check(request.send().await).await?;
        Self::parse(response).await
    }
}

// ============================================
// CUSTOMERS SERVICE
// ============================================

pub mod customers {
    use super::*;

    pub async fn list() -> ApiResult<Vec<Customer>> {
        ApiClient::get("/customers").await
    }
}

// ============================================
// BACKEND COLLABORATOR
// ============================================

/// The edit view's backend, reached over the REST API
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HttpBackend;

#[async_trait(?Send)]
impl CustomerBackend for HttpBackend {
    type Upload = web_sys::File;

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Customer>, BackendError> {
        match ApiClient::get::<Customer>(&format!("/customers/{}", urlencoding::encode(id))).await {
            Ok(customer) => Ok(Some(customer)),
            Err(err) if err.status == Some(404) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn update(&self, id: &str, record: &Customer) -> Result<(), BackendError> {
        ApiClient::put::<Customer, _>(&format!("/customers/{}", urlencoding::encode(id)), record)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    async fn upload_binary(&self, file: web_sys::File) -> Result<ImageAsset, BackendError> {
        ApiClient::upload("/storage", &file).await.map_err(Into::into)
    }

    async fn delete_binary(&self, path: &str) -> Result<(), BackendError> {
        ApiClient::delete(&format!("/storage/o/{}", urlencoding::encode(path)))
            .await
            .map_err(Into::into)
    }
}

// ============================================
// SESSION
// ============================================

pub mod session {
    use gloo_storage::{LocalStorage, Storage};

    const ROLE_KEY: &str = "atelier_role";
    const DEFAULT_ROLE: &str = "manager";

    /// Role kept in local storage, defaulting to manager
    pub fn current_role() -> String {
        LocalStorage::get::<String>(ROLE_KEY).unwrap_or_else(|_| DEFAULT_ROLE.to_string())
    }
}

// ============================================
// BROWSER DIALOGS
// ============================================

pub mod dialogs {
    pub use gloo::dialogs::{alert, confirm};

    pub fn console_error(context: &str, error: &dyn std::fmt::Display) {
        web_sys::console::error_1(&format!("{}: {}", context, error).into());
    }
}
