//! Page location: path, query and relative resource resolution.
//!
//! # Responsibility
//! - Parse the address a page was opened with (`pages/admission-detail.html?id=3`).
//! - Read query parameters (`id`, `year`, `section`).
//! - Resolve relative resource paths (`../data/x.json`) against the page folder.
//!
//! # Invariants
//! - Resolved paths are root-relative and never start with `/`.
//! - `..` segments above the site root clamp at the root, as browsers do.

use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

const SITE_ORIGIN: &str = "http://site.invalid/";

/// Location parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    InvalidAddress { address: String, reason: String },
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddress { address, reason } => {
                write!(f, "invalid page address `{address}`: {reason}")
            }
        }
    }
}

impl Error for LocationError {}

/// Address of the open page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    /// Parses a root-relative page address, optionally with a query.
    pub fn parse(address: &str) -> Result<Self, LocationError> {
        let base = site_base()?;
        let trimmed = address.trim().trim_start_matches('/');
        let url = base.join(trimmed).map_err(|err| LocationError::InvalidAddress {
            address: address.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self { url })
    }

    /// Location of `page` inside `dir`, with an optional raw query string.
    pub fn for_page(dir: &str, page: &str, query: Option<&str>) -> Result<Self, LocationError> {
        let dir = dir.trim().trim_matches('/');
        let mut address = if dir.is_empty() {
            page.to_string()
        } else {
            format!("{dir}/{page}")
        };
        if let Some(query) = query.map(|raw| raw.trim().trim_start_matches('?')) {
            if !query.is_empty() {
                address.push('?');
                address.push_str(query);
            }
        }
        Self::parse(&address)
    }

    /// Root-relative path without query, e.g. `pages/faculty.html`.
    pub fn path(&self) -> String {
        self.url.path().trim_start_matches('/').to_string()
    }

    /// Last path segment; a trailing `/` reads as `index.html`.
    pub fn file_name(&self) -> String {
        let path = self.url.path();
        match path.rsplit('/').next() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "index.html".to_string(),
        }
    }

    /// Folder of the page, root-relative with trailing `/` (empty at root).
    pub fn dir(&self) -> String {
        let path = self.path();
        match path.rfind('/') {
            Some(position) => path[..=position].to_string(),
            None => String::new(),
        }
    }

    /// First value of query parameter `key`.
    pub fn query(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.into_owned())
    }

    pub fn raw_query(&self) -> Option<&str> {
        self.url.query()
    }

    /// Resolves `relative` against the page folder to a root-relative path.
    pub fn resolve(&self, relative: &str) -> Result<String, LocationError> {
        let joined = self
            .url
            .join(relative)
            .map_err(|err| LocationError::InvalidAddress {
                address: relative.to_string(),
                reason: err.to_string(),
            })?;
        Ok(joined.path().trim_start_matches('/').to_string())
    }

    /// Root-relative address of a sibling page, keeping the page folder.
    pub fn sibling(&self, href: &str) -> String {
        let href = href.trim_start_matches('/');
        format!("{}{href}", self.dir())
    }
}

fn site_base() -> Result<Url, LocationError> {
    Url::parse(SITE_ORIGIN).map_err(|err| LocationError::InvalidAddress {
        address: SITE_ORIGIN.to_string(),
        reason: err.to_string(),
    })
}
