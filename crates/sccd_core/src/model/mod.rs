//! Content data model.
//!
//! # Responsibility
//! - Describe the read-only shapes fetched from `data/*.json`.
//! - Provide derived lookups (`RecordIndex`, `DegreeShowIndex`) for detail
//!   views.
//!
//! # Invariants
//! - Nothing in this module mutates fetched content.
//! - Reading a malformed optional field never fails; it yields `""`.

pub mod groups;
pub mod index;
pub mod record;
pub mod timeline;

pub use groups::{CategoryBucket, CategoryBuckets, YearGroup};
pub use index::{DegreeShowIndex, RecordIndex};
pub use record::{ContentList, ContentRecord};
pub use timeline::{flatten_timeline, TimelineEntry, TimelineEra};
