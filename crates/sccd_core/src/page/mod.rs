//! Pages: which sections a page runs and how an open page behaves.
//!
//! A page is looked up once by its file name in the `PageRegistry`; each
//! registered `SectionInitializer` then loads, renders, mounts and binds
//! one content section of the shell document.

pub mod context;
pub mod registry;
pub mod runtime;
pub mod sections;

pub use context::{PageContext, PageServices};
pub use registry::{PageRegistry, RegistryError, SectionError, SectionInitializer};
pub use runtime::{ChromeStatus, Page, PageReport, SectionReport, SectionStatus};
