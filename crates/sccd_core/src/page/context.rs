//! What a section initializer sees while it runs.

use crate::animate::{Animator, InstantAnimator, TweenAnimator};
use crate::config::{AnimationMode, SiteConfig};
use crate::dom::Document;
use crate::fetch::{load_json, Fetcher, ResourcePath};
use crate::interact::{ResizeHandler, SharedAnimator, Viewport};
use crate::location::PageLocation;
use crate::page::registry::SectionError;
use log::info;
use serde::de::DeserializeOwned;
use std::rc::Rc;

/// Collaborators shared by every section of one open page.
#[derive(Clone)]
pub struct PageServices {
    pub fetcher: Rc<dyn Fetcher>,
    pub animator: SharedAnimator,
    pub location: PageLocation,
    pub viewport: Viewport,
    pub config: SiteConfig,
}

impl PageServices {
    /// Services for `location`, with the animator picked from `config`.
    pub fn new(fetcher: Rc<dyn Fetcher>, location: PageLocation, width: u32, config: SiteConfig) -> Self {
        let animator: SharedAnimator = match config.animations {
            AnimationMode::Tween => Rc::new(TweenAnimator::new()),
            AnimationMode::Instant => Rc::new(InstantAnimator::new()),
        };
        Self {
            fetcher,
            animator,
            viewport: Viewport::new(width, config.mobile_breakpoint_px),
            location,
            config,
        }
    }

    pub fn with_animator(mut self, animator: SharedAnimator) -> Self {
        self.animator = animator;
        self
    }

    /// Resource path of data file `name` under the configured data folder.
    pub fn data_path(&self, name: &str) -> ResourcePath {
        let data_dir = self.config.data_dir.trim().trim_matches('/');
        if data_dir.is_empty() || data_dir == "data" {
            ResourcePath::data(name)
        } else {
            ResourcePath::new(format!("../{data_dir}/{name}.json"))
        }
    }

    /// Fetches and parses data file `name` relative to the page.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, SectionError> {
        Ok(load_json(self.fetcher.as_ref(), &self.location, &self.data_path(name))?)
    }
}

/// Side effects a section leaves for the page runtime.
#[derive(Default)]
pub(crate) struct SectionEffects {
    pub(crate) resize_handlers: Vec<ResizeHandler>,
    pub(crate) redirect: Option<String>,
}

/// Mutable view of the page handed to one section initializer.
pub struct PageContext<'a> {
    doc: &'a mut Document,
    services: &'a PageServices,
    effects: &'a mut SectionEffects,
}

impl<'a> PageContext<'a> {
    pub(crate) fn new(doc: &'a mut Document, services: &'a PageServices, effects: &'a mut SectionEffects) -> Self {
        Self { doc, services, effects }
    }

    pub fn doc(&mut self) -> &mut Document {
        &mut *self.doc
    }

    pub fn services(&self) -> &PageServices {
        self.services
    }

    /// Document and services at once, for section bodies shared with
    /// lazy panel loaders.
    pub fn split(&mut self) -> (&mut Document, &PageServices) {
        (&mut *self.doc, self.services)
    }

    pub fn location(&self) -> &PageLocation {
        &self.services.location
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.services.location.query(key)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.services.config
    }

    pub fn animator(&self) -> SharedAnimator {
        Rc::clone(&self.services.animator)
    }

    pub fn animator_ref(&self) -> &dyn Animator {
        self.services.animator.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.services.viewport.clone()
    }

    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, SectionError> {
        self.services.load(name)
    }

    /// Asks the runtime to leave this page for sibling page `page`.
    pub fn redirect_to(&mut self, page: &str) {
        let target = self.services.location.sibling(page);
        info!("event=redirect module=page status=ok target={}", target);
        self.effects.redirect = Some(target);
    }

    /// Registers a handler run after debounced viewport resizes.
    pub fn on_resize(&mut self, handler: ResizeHandler) {
        self.effects.resize_handlers.push(handler);
    }
}
