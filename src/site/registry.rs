// src/site/registry.rs
// =============================================================================
// In-memory index of every page found during discovery, keyed by absolute path.
//
// The registry is shared by all tasks of a run (wrapped in an Arc). Every
// access goes through a single RwLock:
// - discovery tasks take the write lock to insert their page
// - validation tasks take the read lock to look up targets and anchors
// - after validation, each page's links are written back by key
//
// Locks are only held for the duration of one method call and never across
// an .await, so std's RwLock is enough.
// =============================================================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Link, Page};

#[derive(Debug, Default)]
pub struct Registry {
    // BTreeMap keeps pages sorted by path, which is the report order
    pages: RwLock<BTreeMap<PathBuf, Page>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking task must not hide the pages of all the others
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<PathBuf, Page>> {
        self.pages.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<PathBuf, Page>> {
        self.pages.write().unwrap_or_else(PoisonError::into_inner)
    }

    // Adds a page. Returns false (and keeps the existing page) when a page
    // with the same path was already registered.
    pub fn insert(&self, page: Page) -> bool {
        let mut pages = self.write();
        if pages.contains_key(&page.path) {
            return false;
        }
        pages.insert(page.path.clone(), page);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.read().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    // Sorted paths of all registered pages
    pub fn paths(&self) -> Vec<PathBuf> {
        self.read().keys().cloned().collect()
    }

    // Looks up whether `path` declares `anchor`; None when the page is unknown
    pub fn has_anchor(&self, path: &Path, anchor: &str) -> Option<bool> {
        self.read().get(path).map(|page| page.has_anchor(anchor))
    }

    // Copy of the links of a page that can be validated, i.e. a known page
    // without a fatal error
    pub fn checkable_links(&self, path: &Path) -> Option<Vec<Link>> {
        self.read()
            .get(path)
            .filter(|page| page.is_ok())
            .map(|page| page.links.clone())
    }

    // Writes back the links of a page after validation
    pub fn set_links(&self, path: &Path, links: Vec<Link>) {
        if let Some(page) = self.write().get_mut(path) {
            page.links = links;
        }
    }

    // Snapshot of all pages, sorted by path
    pub fn pages(&self) -> Vec<Page> {
        self.read().values().cloned().collect()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is RwLock?
//    - A lock allowing many readers OR one writer at a time
//    - read() for lookups, write() for inserts and updates
//    - The guard it returns unlocks automatically when dropped
//
// 2. What is lock poisoning?
//    - If a thread panics while holding the lock, the lock is "poisoned"
//    - PoisonError::into_inner gives the data back anyway; a page
//      half-inserted by a panicking task is still a valid map
// -----------------------------------------------------------------------------
