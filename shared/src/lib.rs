use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub mod backend;
pub mod edit;
pub mod nav;
pub mod storage;

pub use backend::{BackendError, CustomerBackend};
pub use edit::{EditAction, EditError, EditSession, EditState};
pub use nav::{MenuEntry, MENU};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl Customer {
    /// Link that opens a WhatsApp chat with this customer, if the phone number has any digits.
    pub fn whatsapp_link(&self) -> Option<String> {
        whatsapp_link(&self.phone_number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub id: Option<String>,
    pub customer_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    pub deadline: Option<NaiveDate>,
}

/// A binary object in remote storage.
///
/// Older records hold the public URL only; those deserialize with `path: None`
/// and fall back to deriving the storage path from the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ImageAssetRepr")]
pub struct ImageAsset {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImageAssetRepr {
    Url(String),
    Stored {
        url: String,
        #[serde(default)]
        path: Option<String>,
    },
}

impl From<ImageAssetRepr> for ImageAsset {
    fn from(repr: ImageAssetRepr) -> Self {
        match repr {
            ImageAssetRepr::Url(url) => ImageAsset { url, path: None },
            ImageAssetRepr::Stored { url, path } => ImageAsset { url, path },
        }
    }
}

impl ImageAsset {
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: Some(path.into()),
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: None,
        }
    }

    /// Storage path used to delete this object.
    pub fn storage_path(&self) -> Option<Cow<'_, str>> {
        match &self.path {
            Some(path) if !path.is_empty() => Some(Cow::Borrowed(path.as_str())),
            _ => storage::path_from_url(storage::OBJECT_URL_BASE, &self.url).map(Cow::Owned),
        }
    }
}

/// Builds a `wa.me` link from a free-form phone number by keeping only its digits.
pub fn whatsapp_link(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("https://wa.me/{}", digits))
    }
}
