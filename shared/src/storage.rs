//! Object URL template shared by the storage service and the edit view.
//!
//! Objects are served at `<base><percent-encoded path>?alt=media`. The base is
//! fixed; a URL built under a different scheme has no derivable path.

pub const OBJECT_URL_BASE: &str = "/api/v1/storage/o/";

const MEDIA_QUERY: &str = "alt=media";

pub fn object_url(base: &str, path: &str) -> String {
    format!("{}{}?{}", base, urlencoding::encode(path), MEDIA_QUERY)
}

/// Recovers the storage path from an object URL, ignoring any scheme and host.
pub fn path_from_url(base: &str, url: &str) -> Option<String> {
    let local = strip_origin(url);
    let encoded = local.strip_prefix(base)?;
    let encoded = encoded.split(['?', '#']).next().unwrap_or_default();
    if encoded.is_empty() {
        return None;
    }
    urlencoding::decode(encoded)
        .ok()
        .map(|path| path.into_owned())
        .filter(|path| !path.is_empty())
}

fn strip_origin(url: &str) -> &str {
    match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or(""),
        None => url,
    }
}
