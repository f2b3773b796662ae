//! Activities page section switch.
//!
//! # Invariants
//! - Exactly one `.activities-panel` is visible: `#panel-<section>`.
//! - Each panel's loader runs at most once per page.

use crate::dom::Document;
use crate::interact::filter::{set_active, ACTIVE_CLASS};
use crate::interact::on_click;
use crate::render::common::accent_color;
use log::debug;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

pub const SECTION_BUTTON: &str = "activities-section-btn";
pub const PANEL: &str = "activities-panel";
pub const DEFAULT_SECTION: &str = "general";

/// Loads the content of one section into its panel.
pub type SectionLoader = Rc<dyn Fn(&mut Document, &str)>;

pub fn panel_id(section: &str) -> String {
    format!("panel-{section}")
}

/// Section to show first: `?section=` when present and non-blank.
pub fn initial_section(query: Option<&str>) -> String {
    query
        .map(str::trim)
        .filter(|section| !section.is_empty())
        .unwrap_or(DEFAULT_SECTION)
        .to_string()
}

struct Switch {
    loaded: RefCell<BTreeSet<String>>,
    switches: Cell<usize>,
    loader: SectionLoader,
}

impl Switch {
    fn show(&self, doc: &mut Document, section: &str) {
        let buttons = doc.query_class_all(SECTION_BUTTON);
        for button in &buttons {
            doc.remove_style(*button, "color");
        }
        match buttons
            .iter()
            .copied()
            .find(|button| doc.attr(*button, "data-section") == Some(section))
        {
            Some(button) => {
                set_active(doc, &buttons, button);
                doc.set_style(button, "color", accent_color(self.switches.get()));
                self.switches.set(self.switches.get() + 1);
            }
            None => {
                for button in &buttons {
                    doc.remove_class(*button, ACTIVE_CLASS);
                }
            }
        }

        for panel in doc.query_class_all(PANEL) {
            doc.add_class(panel, "hidden");
        }
        if let Some(target) = doc.get_element_by_id(&panel_id(section)) {
            doc.remove_class(target, "hidden");
        }

        let first_time = self.loaded.borrow_mut().insert(section.to_string());
        if first_time {
            debug!("event=section_load module=interact section={}", section);
            (self.loader)(doc, section);
        }
    }
}

/// Shows `initial` and binds every section button. Returns how many
/// buttons were bound; a page without buttons loads nothing.
pub fn bind_section_switch(doc: &mut Document, initial: &str, loader: SectionLoader) -> usize {
    let buttons = doc.query_class_all(SECTION_BUTTON);
    if buttons.is_empty() {
        return 0;
    }
    let switch = Rc::new(Switch {
        loaded: RefCell::new(BTreeSet::new()),
        switches: Cell::new(0),
        loader,
    });
    switch.show(doc, initial);
    for button in &buttons {
        let switch = Rc::clone(&switch);
        on_click(doc, *button, move |doc, event| {
            let section = doc
                .attr(event.current_target, "data-section")
                .unwrap_or_default()
                .to_string();
            switch.show(doc, &section);
        });
    }
    buttons.len()
}

#[cfg(test)]
mod tests {
    use super::{bind_section_switch, initial_section, SectionLoader};
    use crate::dom::{Document, Element, Fragment};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn shell() -> Document {
        let mut fragment = Fragment::new();
        for section in ["general", "workshop"] {
            fragment.push(
                Element::new("button")
                    .id(format!("btn-{section}"))
                    .class("activities-section-btn")
                    .attr("data-section", section),
            );
            fragment.push(Element::new("div").id(format!("panel-{section}")).class("activities-panel"));
        }
        Document::from_fragment(fragment)
    }

    #[test]
    fn blank_query_falls_back_to_general() {
        assert_eq!(initial_section(None), "general");
        assert_eq!(initial_section(Some("  ")), "general");
        assert_eq!(initial_section(Some("workshop")), "workshop");
    }

    #[test]
    fn panels_switch_and_load_once() {
        let mut doc = shell();
        let calls = Rc::new(RefCell::new(Vec::<String>::new()));
        let recorded = Rc::clone(&calls);
        let loader: SectionLoader = Rc::new(move |_doc: &mut Document, section: &str| recorded.borrow_mut().push(section.to_string()));
        assert_eq!(bind_section_switch(&mut doc, "workshop", loader), 2);

        let general = doc.get_element_by_id("panel-general").expect("general");
        let workshop = doc.get_element_by_id("panel-workshop").expect("workshop");
        assert!(doc.has_class(general, "hidden") && !doc.has_class(workshop, "hidden"));
        let button = doc.get_element_by_id("btn-workshop").expect("button");
        assert!(doc.has_class(button, "active"));
        assert!(doc.style(button, "color").is_some());

        let general_btn = doc.get_element_by_id("btn-general").expect("button");
        doc.dispatch_click(general_btn);
        doc.dispatch_click(button);
        doc.dispatch_click(general_btn);
        assert_eq!(*calls.borrow(), vec!["workshop".to_string(), "general".to_string()]);
        assert_eq!(doc.style(button, "color"), None);
    }
}
