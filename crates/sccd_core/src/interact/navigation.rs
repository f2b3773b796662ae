//! Site navigation in the header chrome: current-page highlighting and the
//! mobile menu.
//!
//! # Invariants
//! - The mobile menu is open exactly when `.mobile-nav` carries `open`; the
//!   button icon and body scroll lock follow that state.
//! - Submenus are shown exactly when they lack the `hidden` class.
//! - Following any link inside the mobile menu closes it.

use crate::animate::{Animator, Ease, Tween, TweenProp, TweenValue};
use crate::dom::{Document, NodeId};
use crate::interact::{on_click, SharedAnimator};
use log::debug;
use std::rc::Rc;

pub const MENU_BUTTON: &str = "mobile-menu-btn";
pub const MOBILE_NAV: &str = "mobile-nav";
pub const SUBMENU_TOGGLE: &str = "mobile-submenu-toggle";
pub const NAV_LINK: &str = "nav-link";
pub const SUBMENU_LINK: &str = "submenu-link";

const OPEN: &str = "open";
const ICON_CLOSED: &str = "fa-bars";
const ICON_OPEN: &str = "fa-xmark";
const ITEM_STAGGER_MS: u64 = 50;
const ITEM_DELAY_MS: u64 = 1000;

/// Detail pages highlight the listing they belong to.
const PAGE_PARENTS: [(&str, &str); 3] = [
    ("admission-detail.html", "admission.html"),
    ("degree-show-detail.html", "degree-show.html"),
    ("faculty-detail.html", "faculty.html"),
];

/// Marks the navigation links pointing at `page` as `active`. A matching
/// submenu link also marks the top-level link of its item. Returns how
/// many links were marked.
pub fn mark_current_page(doc: &mut Document, page: &str) -> usize {
    let current = PAGE_PARENTS
        .iter()
        .find(|(detail, _)| *detail == page)
        .map(|(_, parent)| *parent)
        .unwrap_or(page);
    let mut marked = 0;
    for link in doc.query_class_all(NAV_LINK) {
        if links_to(doc, link, current) {
            doc.add_class(link, "active");
            marked += 1;
        }
    }
    for link in doc.query_class_all(SUBMENU_LINK) {
        if !links_to(doc, link, current) {
            continue;
        }
        doc.add_class(link, "active");
        marked += 1;
        if let Some(parent) = parent_nav_link(doc, link) {
            doc.add_class(parent, "active");
        }
    }
    marked
}

fn links_to(doc: &Document, link: NodeId, page: &str) -> bool {
    doc.attr(link, "href")
        .and_then(|href| href.rsplit('/').next())
        .is_some_and(|file| file == page)
}

/// `a.nav-link` that is a direct child of the nearest enclosing `<li>`.
fn parent_nav_link(doc: &Document, link: NodeId) -> Option<NodeId> {
    let mut node = doc.parent(link);
    while let Some(current) = node {
        if doc.tag(current) == Some("li") {
            if let Some(parent) = doc
                .element_children(current)
                .into_iter()
                .find(|child| doc.has_class(*child, NAV_LINK))
            {
                return Some(parent);
            }
        }
        node = doc.parent(current);
    }
    None
}

pub fn menu_is_open(doc: &Document) -> bool {
    doc.query_class_all(MOBILE_NAV)
        .first()
        .is_some_and(|nav| doc.has_class(*nav, OPEN))
}

#[derive(Debug, Clone, Copy)]
struct MobileMenu {
    button: NodeId,
    nav: NodeId,
}

impl MobileMenu {
    fn find(doc: &Document) -> Option<Self> {
        Some(Self {
            button: *doc.query_class_all(MENU_BUTTON).first()?,
            nav: *doc.query_class_all(MOBILE_NAV).first()?,
        })
    }

    fn swap_icon(&self, doc: &mut Document, open: bool) {
        let Some(icon) = doc.query_first_tag(self.button, "i") else {
            return;
        };
        let (from, to) = if open { (ICON_CLOSED, ICON_OPEN) } else { (ICON_OPEN, ICON_CLOSED) };
        doc.remove_class(icon, from);
        doc.add_class(icon, to);
    }

    /// Top-level items of the menu list, revealed one after another.
    fn items(&self, doc: &Document) -> Vec<NodeId> {
        let Some(list) = doc.query_first_tag(self.nav, "ul") else {
            return Vec::new();
        };
        doc.element_children(list)
            .into_iter()
            .filter(|item| doc.tag(*item) == Some("li"))
            .collect()
    }

    fn open(&self, doc: &mut Document, animator: &dyn Animator) {
        doc.add_class(self.nav, OPEN);
        animator.to(
            doc,
            Tween::new(self.nav, TweenProp::TranslateX, TweenValue::Percent(0.0), 500).ease(Ease::Power2Out),
        );
        for (position, item) in self.items(doc).into_iter().enumerate() {
            animator.set(doc, item, TweenProp::Opacity, TweenValue::Number(0.0));
            animator.to(
                doc,
                Tween::new(item, TweenProp::Opacity, TweenValue::Number(1.0), 400)
                    .delay(ITEM_DELAY_MS + ITEM_STAGGER_MS * position as u64)
                    .ease(Ease::Power2Out),
            );
        }
        let body = doc.body();
        doc.set_style(body, "overflow", "hidden");
        self.swap_icon(doc, true);
    }

    fn close(&self, doc: &mut Document, animator: &dyn Animator) {
        doc.remove_class(self.nav, OPEN);
        animator.to(
            doc,
            Tween::new(self.nav, TweenProp::TranslateX, TweenValue::Percent(-100.0), 300).ease(Ease::Power2Out),
        );
        let body = doc.body();
        doc.set_style(body, "overflow", "auto");
        self.swap_icon(doc, false);
    }
}

/// Binds the hamburger button, submenu toggles and menu links. Returns
/// `false` when the chrome has no mobile menu.
pub fn bind_mobile_menu(doc: &mut Document, animator: SharedAnimator) -> bool {
    let Some(menu) = MobileMenu::find(doc) else {
        debug!("event=bind_skipped module=interact widget=mobile_menu reason=no_menu");
        return false;
    };

    let toggle_animator = Rc::clone(&animator);
    on_click(doc, menu.button, move |doc, _| {
        if doc.has_class(menu.nav, OPEN) {
            menu.close(doc, toggle_animator.as_ref());
        } else {
            menu.open(doc, toggle_animator.as_ref());
        }
    });

    for toggle in doc.query_class_all(SUBMENU_TOGGLE) {
        let animator = Rc::clone(&animator);
        on_click(doc, toggle, move |doc, event| {
            toggle_submenu(doc, animator.as_ref(), event.current_target);
        });
    }

    let links: Vec<NodeId> = doc
        .descendants(menu.nav)
        .into_iter()
        .filter(|node| doc.tag(*node) == Some("a"))
        .collect();
    for link in links {
        let animator = Rc::clone(&animator);
        on_click(doc, link, move |doc, _| {
            if doc.has_class(menu.nav, OPEN) {
                menu.close(doc, animator.as_ref());
            }
        });
    }
    true
}

fn toggle_submenu(doc: &mut Document, animator: &dyn Animator, toggle: NodeId) {
    let Some(submenu) = doc.next_element_sibling(toggle) else {
        return;
    };
    let opening = doc.has_class(submenu, "hidden");
    doc.toggle_class(submenu, "hidden", Some(!opening));
    if let Some(chevron) = doc.query_first_class(toggle, "fa-chevron-down") {
        let angle = if opening { 180.0 } else { 0.0 };
        animator.to(doc, Tween::new(chevron, TweenProp::Rotation, TweenValue::Deg(angle), 300));
    }
}
