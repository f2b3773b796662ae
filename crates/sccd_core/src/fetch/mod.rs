//! Resource fetching for page sections.
//!
//! # Responsibility
//! - Turn a resource path into text or parsed JSON, or a typed `FetchError`.
//! - Provide `load_or_default` so section initializers never see a failure:
//!   they receive data or the fallback, and the failure goes to the log.
//!
//! # Invariants
//! - Fetchers are addressed with root-relative paths; page-relative paths go
//!   through `PageLocation::resolve` first.
//! - No deduplication, retry, timeout or cache.

pub mod fs;
pub mod memory;

use crate::location::{LocationError, PageLocation};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use fs::FsFetcher;
pub use memory::StaticFetcher;

pub type FetchResult<T> = Result<T, FetchError>;

/// Fetch failure taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Resource does not exist (HTTP 404 equivalent).
    NotFound(String),
    /// Non-OK response status other than 404.
    Status { path: String, status: u16 },
    /// Path tries to leave the site root.
    OutsideRoot(String),
    Io { path: String, message: String },
    /// Body is not JSON.
    Parse { path: String, message: String },
    /// Body is JSON of the wrong shape for the section.
    Decode { path: String, message: String },
    Location(LocationError),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "resource not found: {path}"),
            Self::Status { path, status } => write!(f, "resource {path} returned status {status}"),
            Self::OutsideRoot(path) => write!(f, "resource path escapes site root: {path}"),
            Self::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            Self::Parse { path, message } => write!(f, "resource {path} is not valid JSON: {message}"),
            Self::Decode { path, message } => {
                write!(f, "resource {path} does not have the expected shape: {message}")
            }
            Self::Location(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Location(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LocationError> for FetchError {
    fn from(value: LocationError) -> Self {
        Self::Location(value)
    }
}

impl FetchError {
    /// HTTP-like status for log lines.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Page-relative resource reference, e.g. `../data/faculty.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new(relative: impl Into<String>) -> Self {
        Self(relative.into())
    }

    /// `../data/<name>.json`.
    pub fn data(name: &str) -> Self {
        Self(format!("../data/{name}.json"))
    }

    /// `../components/<name>.html`.
    pub fn component(name: &str) -> Self {
        Self(format!("../components/{name}.html"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ResourcePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of site resources.
pub trait Fetcher {
    /// Reads the resource at a root-relative path.
    fn fetch_text(&self, path: &str) -> FetchResult<String>;

    /// Reads and parses the resource at a root-relative path.
    fn fetch_json(&self, path: &str) -> FetchResult<Value> {
        let text = self.fetch_text(path)?;
        serde_json::from_str(&text).map_err(|err| FetchError::Parse {
            path: path.to_string(),
            message: err.to_string(),
        })
    }
}

/// Resolves `resource` against the page and fetches it as typed JSON.
pub fn load_json<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    location: &PageLocation,
    resource: &ResourcePath,
) -> FetchResult<T> {
    let path = location.resolve(resource.as_str())?;
    let value = fetcher.fetch_json(&path)?;
    serde_json::from_value(value).map_err(|err| FetchError::Decode {
        path,
        message: err.to_string(),
    })
}

/// Resolves `resource` against the page and fetches it as text.
pub fn load_text(
    fetcher: &dyn Fetcher,
    location: &PageLocation,
    resource: &ResourcePath,
) -> FetchResult<String> {
    let path = location.resolve(resource.as_str())?;
    fetcher.fetch_text(&path)
}

/// Like `load_json`, but any failure is logged and `T::default()` returned.
pub fn load_or_default<T: DeserializeOwned + Default>(
    fetcher: &dyn Fetcher,
    location: &PageLocation,
    resource: &ResourcePath,
) -> T {
    load_or_else(fetcher, location, resource, T::default)
}

/// Like `load_json`, but any failure is logged and `fallback()` returned.
pub fn load_or_else<T, F>(
    fetcher: &dyn Fetcher,
    location: &PageLocation,
    resource: &ResourcePath,
    fallback: F,
) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match load_json(fetcher, location, resource) {
        Ok(value) => value,
        Err(err) => {
            log_fetch_failure(resource, &err);
            fallback()
        }
    }
}

pub(crate) fn log_fetch_failure(resource: &ResourcePath, err: &FetchError) {
    warn!(
        "event=fetch_failed module=fetch status=error path={} http_status={} reason={}",
        resource,
        err.status()
            .map(|status| status.to_string())
            .unwrap_or_else(|| "none".to_string()),
        err
    );
}

#[cfg(test)]
mod tests {
    use super::{load_json, load_or_default, FetchError, ResourcePath, StaticFetcher};
    use crate::location::PageLocation;
    use serde_json::json;

    fn page() -> PageLocation {
        PageLocation::for_page("pages", "records.html", None).expect("valid location")
    }

    #[test]
    fn data_paths_resolve_against_page_folder() {
        let fetcher = StaticFetcher::new().with_json("data/records.json", &json!([1, 2]));
        let values: Vec<u32> =
            load_json(&fetcher, &page(), &ResourcePath::data("records")).expect("loads");
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn load_or_default_swallows_missing_and_malformed() {
        let fetcher = StaticFetcher::new().with_text("data/broken.json", "{ nope");
        let missing: Vec<u32> = load_or_default(&fetcher, &page(), &ResourcePath::data("absent"));
        let broken: Vec<u32> = load_or_default(&fetcher, &page(), &ResourcePath::data("broken"));
        assert!(missing.is_empty());
        assert!(broken.is_empty());
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let fetcher = StaticFetcher::new().with_json("data/records.json", &json!({"a": 1}));
        let err = load_json::<Vec<u32>>(&fetcher, &page(), &ResourcePath::data("records"))
            .expect_err("object is not a list");
        assert!(matches!(err, FetchError::Decode { .. }));
        assert!(err.to_string().contains("expected shape"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn broken_body_is_a_parse_error() {
        let fetcher = StaticFetcher::new().with_text("data/records.json", "[1, 2");
        let err = load_json::<Vec<u32>>(&fetcher, &page(), &ResourcePath::data("records"))
            .expect_err("truncated body");
        assert!(matches!(err, FetchError::Parse { .. }));
        assert!(err.to_string().contains("not valid JSON"));
    }
}
