//! Page-to-section registration table.
//!
//! # Responsibility
//! - Map page file names to the ordered section initializers they run.
//! - Resolve a request path to its page key once, at page open.
//!
//! # Invariants
//! - Page keys and section ids match `[a-z0-9_.-]+`.
//! - A section id appears at most once per page.

use crate::dom::Fragment;
use crate::fetch::FetchError;
use crate::location::{LocationError, PageLocation};
use crate::page::context::PageContext;
use crate::page::sections;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_.-]+$").expect("id pattern must compile"));

/// Registration and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidPageId(String),
    InvalidSectionId(String),
    DuplicateSection { page: String, section: String },
    PageNotFound(String),
    Location(LocationError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPageId(value) => write!(f, "page id is invalid: {value}"),
            Self::InvalidSectionId(value) => write!(f, "section id is invalid: {value}"),
            Self::DuplicateSection { page, section } => {
                write!(f, "section `{section}` already registered on page `{page}`")
            }
            Self::PageNotFound(value) => write!(f, "page not registered: {value}"),
            Self::Location(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Location(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LocationError> for RegistryError {
    fn from(value: LocationError) -> Self {
        Self::Location(value)
    }
}

/// Failure of one section initializer. Never fatal to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    Fetch(FetchError),
}

impl Display for SectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
        }
    }
}

impl From<FetchError> for SectionError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

/// One content section of a page: fetch, render, mount, bind.
pub trait SectionInitializer {
    /// Stable section id, unique within a page.
    fn id(&self) -> &str;

    /// Containers and controls this section expects in the page shell.
    fn shell_containers(&self) -> Fragment;

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError>;
}

/// Runtime page registry.
#[derive(Default)]
pub struct PageRegistry {
    pages: BTreeMap<String, Vec<Arc<dyn SectionInitializer>>>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every page of the site.
    pub fn site_default() -> Self {
        let mut registry = Self::new();
        for (page, initializers) in sections::site_pages() {
            for initializer in initializers {
                if let Err(err) = registry.register(page, initializer) {
                    log::error!("event=register_failed module=page status=error reason={}", err);
                }
            }
        }
        registry
    }

    /// Appends one initializer to `page`.
    pub fn register(
        &mut self,
        page: &str,
        initializer: Arc<dyn SectionInitializer>,
    ) -> Result<(), RegistryError> {
        let page = page.trim().to_string();
        if !is_valid_id(&page) {
            return Err(RegistryError::InvalidPageId(page));
        }
        let section = initializer.id().trim().to_string();
        if !is_valid_id(&section) {
            return Err(RegistryError::InvalidSectionId(section));
        }
        let entry = self.pages.entry(page.clone()).or_default();
        if entry.iter().any(|existing| existing.id() == section) {
            return Err(RegistryError::DuplicateSection { page, section });
        }
        entry.push(initializer);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Sorted page keys.
    pub fn page_ids(&self) -> Vec<String> {
        self.pages.keys().cloned().collect()
    }

    /// Page key for a request path: its file name, `/` reading as
    /// `index.html`.
    pub fn resolve(&self, path: &str) -> Result<String, RegistryError> {
        let key = PageLocation::parse(path)?.file_name();
        if self.pages.contains_key(&key) {
            Ok(key)
        } else {
            Err(RegistryError::PageNotFound(key))
        }
    }

    pub fn sections_for(&self, page: &str) -> Result<&[Arc<dyn SectionInitializer>], RegistryError> {
        self.pages
            .get(page.trim())
            .map(Vec::as_slice)
            .ok_or_else(|| RegistryError::PageNotFound(page.trim().to_string()))
    }

    /// Section ids of `page` in run order.
    pub fn section_ids(&self, page: &str) -> Result<Vec<String>, RegistryError> {
        Ok(self
            .sections_for(page)?
            .iter()
            .map(|initializer| initializer.id().to_string())
            .collect())
    }
}

fn is_valid_id(value: &str) -> bool {
    ID_PATTERN.is_match(value)
}
