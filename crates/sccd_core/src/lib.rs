//! Content pipeline of the SCCD site.
//! Fetch JSON, render fragments, mount them into page containers and bind
//! the interactions, one registered section at a time.

pub mod animate;
pub mod config;
pub mod dom;
pub mod fetch;
pub mod interact;
pub mod location;
pub mod logging;
pub mod model;
pub mod mount;
pub mod page;
pub mod render;

pub use animate::{Animator, InstantAnimator, Tween, TweenAnimator, TweenProp, TweenValue};
pub use config::{AnimationMode, ConfigError, SiteConfig, CONFIG_FILE_NAME};
pub use dom::{Document, Element, Fragment, NodeId};
pub use fetch::{FetchError, Fetcher, FsFetcher, ResourcePath, StaticFetcher};
pub use location::{LocationError, PageLocation};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::{ContentList, ContentRecord, DegreeShowIndex, RecordIndex, YearGroup};
pub use mount::{mount, MountOutcome};
pub use page::{
    Page, PageContext, PageRegistry, PageReport, PageServices, RegistryError, SectionError,
    SectionInitializer, SectionStatus,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
