// src/site/mod.rs
// =============================================================================
// The data model of a run.
//
// Submodules:
// - page: Page and Link records, and page classification (language, path)
// - registry: thread-safe index of all pages, keyed by path
// =============================================================================

mod page;
mod registry;

pub use page::{Link, LinkTarget, Page, ANCHOR_SEPARATOR};
pub use registry::Registry;
