//! Open page: shell document, chrome, sections and the page clock.
//!
//! # Responsibility
//! - Load the shared header/footer chrome, bind its navigation, then run
//!   every registered section of the page in order.
//! - Keep one section's failure from affecting the others.
//! - Drive clicks, animation time and debounced resizes after open.
//!
//! # Invariants
//! - Sections run at most once per open page.
//! - Once a section asks for a redirect, later sections do not run.
//! - Resize handlers see the viewport width already updated.

use crate::dom::{parse_fragment, Document, Element, Fragment};
use crate::fetch::{load_text, log_fetch_failure, ResourcePath};
use crate::interact::navigation::{bind_mobile_menu, mark_current_page};
use crate::interact::ResizeHandler;
use crate::mount::mount;
use crate::page::context::{PageContext, PageServices, SectionEffects};
use crate::page::registry::{PageRegistry, RegistryError};
use log::{debug, error, info};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const HEADER_PLACEHOLDER: &str = "header-placeholder";
pub const FOOTER_PLACEHOLDER: &str = "footer-placeholder";

/// Outcome of one section initializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SectionStatus {
    Ok,
    Failed(String),
    /// Not run because an earlier section redirected.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub id: String,
    #[serde(flatten)]
    pub status: SectionStatus,
}

/// Which chrome fragments made it into the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChromeStatus {
    pub header: bool,
    pub footer: bool,
}

/// Summary of one page open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub page: String,
    pub sections: Vec<SectionReport>,
    pub chrome: ChromeStatus,
    pub redirect: Option<String>,
}

impl PageReport {
    pub fn failed(&self) -> usize {
        self.sections
            .iter()
            .filter(|section| matches!(section.status, SectionStatus::Failed(_)))
            .count()
    }

    pub fn succeeded(&self) -> usize {
        self.sections
            .iter()
            .filter(|section| section.status == SectionStatus::Ok)
            .count()
    }

    pub fn status_of(&self, section: &str) -> Option<&SectionStatus> {
        self.sections
            .iter()
            .find(|report| report.id == section)
            .map(|report| &report.status)
    }
}

impl Display for PageReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "page={} sections={} ok={} failed={} header={} footer={} redirect={}",
            self.page,
            self.sections.len(),
            self.succeeded(),
            self.failed(),
            self.chrome.header,
            self.chrome.footer,
            self.redirect.as_deref().unwrap_or("none")
        )
    }
}

/// Result of running a page's sections against a document.
pub struct SectionRun {
    pub sections: Vec<SectionReport>,
    pub redirect: Option<String>,
    pub resize_handlers: Vec<ResizeHandler>,
}

impl PageRegistry {
    /// Runs every section of `page` against `doc`, isolating failures.
    pub fn run(&self, page: &str, doc: &mut Document, services: &PageServices) -> Result<SectionRun, RegistryError> {
        let initializers = self.sections_for(page)?;
        let mut effects = SectionEffects::default();
        let mut sections = Vec::with_capacity(initializers.len());

        for initializer in initializers {
            let id = initializer.id().to_string();
            if effects.redirect.is_some() {
                sections.push(SectionReport {
                    id,
                    status: SectionStatus::Skipped,
                });
                continue;
            }
            let result = {
                let mut ctx = PageContext::new(doc, services, &mut effects);
                initializer.init(&mut ctx)
            };
            let status = match result {
                Ok(()) => {
                    info!(
                        "event=section_init module=page status=ok page={} section={}",
                        page, id
                    );
                    SectionStatus::Ok
                }
                Err(err) => {
                    error!(
                        "event=section_init module=page status=error page={} section={} reason={}",
                        page, id, err
                    );
                    SectionStatus::Failed(err.to_string())
                }
            };
            sections.push(SectionReport { id, status });
        }

        Ok(SectionRun {
            sections,
            redirect: effects.redirect,
            resize_handlers: effects.resize_handlers,
        })
    }

    /// Synthesized shell for `page`: chrome placeholders around the
    /// containers every section declares.
    pub fn shell_for(&self, page: &str) -> Result<Document, RegistryError> {
        let mut main = Element::new("main");
        for initializer in self.sections_for(page)? {
            main = main.child(
                Element::new("section")
                    .attr("data-section", initializer.id())
                    .fragment(initializer.shell_containers()),
            );
        }
        let mut doc = Document::from_fragment(
            Fragment::new()
                .with(Element::new("div").id(HEADER_PLACEHOLDER))
                .with(main)
                .with(Element::new("div").id(FOOTER_PLACEHOLDER)),
        );
        doc.set_title(page);
        Ok(doc)
    }
}

/// Fetches one chrome component and mounts it into its placeholder as
/// elements. Returns whether it was mounted.
fn load_chrome(doc: &mut Document, services: &PageServices, component: &str, placeholder: &str) -> bool {
    if doc.get_element_by_id(placeholder).is_none() {
        debug!(
            "event=chrome_skipped module=page status=noop component={} reason=no_placeholder",
            component
        );
        return false;
    }
    let resource = ResourcePath::component(component);
    match load_text(services.fetcher.as_ref(), &services.location, &resource) {
        Ok(html) => mount(doc, placeholder, parse_fragment(&html)).is_mounted(),
        Err(err) => {
            log_fetch_failure(&resource, &err);
            false
        }
    }
}

struct PendingResize {
    width: u32,
    remaining_ms: u64,
}

/// A page opened against a shell document.
pub struct Page {
    key: String,
    doc: Document,
    services: PageServices,
    resize_handlers: Vec<ResizeHandler>,
    pending_resize: Option<PendingResize>,
    report: PageReport,
}

impl Page {
    /// Resolves the page from the services' location, loads the chrome and
    /// runs every registered section.
    pub fn open(registry: &PageRegistry, shell: Document, services: PageServices) -> Result<Self, RegistryError> {
        let key = registry.resolve(&services.location.path())?;
        let mut doc = shell;
        info!(
            "event=page_open module=page status=start page={} query={}",
            key,
            services.location.raw_query().unwrap_or("")
        );

        let chrome = ChromeStatus {
            header: load_chrome(&mut doc, &services, "header", HEADER_PLACEHOLDER),
            footer: load_chrome(&mut doc, &services, "footer", FOOTER_PLACEHOLDER),
        };
        if chrome.header {
            let marked = mark_current_page(&mut doc, &key);
            let menu = bind_mobile_menu(&mut doc, services.animator.clone());
            debug!(
                "event=chrome_bound module=page page={} active_links={} mobile_menu={}",
                key, marked, menu
            );
        }
        let run = registry.run(&key, &mut doc, &services)?;
        let report = PageReport {
            page: key.clone(),
            sections: run.sections,
            chrome,
            redirect: run.redirect,
        };
        info!(
            "event=page_open module=page status=ok page={} ok={} failed={}",
            key,
            report.succeeded(),
            report.failed()
        );

        Ok(Self {
            key,
            doc,
            services,
            resize_handlers: run.resize_handlers,
            pending_resize: None,
            report,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn services(&self) -> &PageServices {
        &self.services
    }

    pub fn report(&self) -> &PageReport {
        &self.report
    }

    /// Where a section asked to navigate, if any.
    pub fn redirect(&self) -> Option<&str> {
        self.report.redirect.as_deref()
    }

    /// Clicks the element with id `element_id`. Returns `false` when no
    /// such element exists.
    pub fn click(&mut self, element_id: &str) -> bool {
        match self.doc.get_element_by_id(element_id) {
            Some(target) => {
                self.doc.dispatch_click(target);
                true
            }
            None => {
                debug!(
                    "event=click_skipped module=page status=noop element={}",
                    element_id
                );
                false
            }
        }
    }

    /// Moves the page clock: running tweens first, then the resize window.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.services.animator.advance(&mut self.doc, elapsed_ms);
        let due = match self.pending_resize.as_mut() {
            Some(pending) => {
                pending.remaining_ms = pending.remaining_ms.saturating_sub(elapsed_ms);
                pending.remaining_ms == 0
            }
            None => false,
        };
        if due {
            self.flush_resize();
        }
    }

    /// Records a viewport resize. Resizes within the debounce window
    /// collapse into the last one.
    pub fn resize(&mut self, width: u32) {
        let debounce_ms = self.services.config.resize_debounce_ms;
        self.pending_resize = Some(PendingResize {
            width,
            remaining_ms: debounce_ms,
        });
        if debounce_ms == 0 {
            self.flush_resize();
        }
    }

    /// Applies a pending resize now.
    pub fn flush_resize(&mut self) {
        let Some(pending) = self.pending_resize.take() else {
            return;
        };
        self.services.viewport.set_width(pending.width);
        debug!(
            "event=resize module=page status=ok page={} width={} handlers={}",
            self.key,
            pending.width,
            self.resize_handlers.len()
        );
        for handler in &self.resize_handlers {
            handler(&mut self.doc, pending.width);
        }
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_some()
    }

    pub fn to_html(&self) -> String {
        self.doc.to_html()
    }
}
