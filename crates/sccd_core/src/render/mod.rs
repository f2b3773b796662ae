//! Pure renderers: content data in, markup fragments out.
//!
//! # Responsibility
//! - One module per content section, each exposing `render_*` functions and
//!   the container ids it renders into.
//!
//! # Invariants
//! - Renderers read no global state and have no side effects.
//! - Missing optional fields render as empty strings.
//! - List renderers given no records render the shared empty state.
//! - Only fields that carry authored HTML are emitted unescaped.

pub mod activities;
pub mod admission;
pub mod common;
pub mod courses;
pub mod degree_show;
pub mod faculty;
pub mod legal;
pub mod library;
pub mod records;
pub mod resources;
pub mod support;
pub mod timeline;
pub mod works;

pub use common::{empty_state, EMPTY_STATE_TEXT};
