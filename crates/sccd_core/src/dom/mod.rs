//! Document model shared by renderers, mount and binders.
//!
//! # Responsibility
//! - `fragment`: owned markup produced by pure renderers.
//! - `document`: the live page tree that fragments are mounted into.
//! - `parse`: reads chrome component HTML into fragments.

pub mod document;
pub mod fragment;
pub mod parse;

pub use document::{ClickEvent, ClickHandler, Document, NodeId};
pub use fragment::{escape_html, Element, Fragment, Node};
pub use parse::parse_fragment;
