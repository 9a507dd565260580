// src/crawl/walk.rs
// =============================================================================
// Discovery phase: find every markdown page under the root and read it.
//
// How it works:
// 1. Walk the root directory recursively (sequentially, with walkdir)
// 2. For each .md file, spawn one tokio task that reads, classifies and
//    parses the page, then inserts it into the registry
// 3. Wait for all the tasks to finish before returning
//
// Files that are not markdown are ignored. Paths the walk can't visit are
// registered as pages carrying a fatal error, so they show in the report.
// =============================================================================

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use walkdir::WalkDir;

use crate::checker::read_page;
use crate::config::SiteConfig;
use crate::debug;
use crate::error::PageError;
use crate::site::{Page, Registry};

// Reads all markdown pages below the root into the registry
//
// Returns: the number of pages registered
pub async fn discover(config: Arc<SiteConfig>, registry: Arc<Registry>) -> Result<usize> {
    let mut tasks = Vec::new();

    for entry in WalkDir::new(&config.root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(config.root.as_path()).to_path_buf();
                let error = PageError::Walk {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                };
                registry.insert(Page::with_error(path, error));
                continue;
            }
        };

        if entry.file_type().is_dir() || !is_markdown(entry.path()) {
            continue;
        }

        let path = entry.into_path();
        let config = Arc::clone(&config);
        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(async move {
            let page = read_page(&config, path).await;
            debug!(
                "walk";
                "read {} ({} links, {} anchors)",
                page.path.display(),
                page.links.len(),
                page.anchors.len()
            );
            registry.insert(page);
        }));
    }

    // Barrier: every read task must be done before validation starts
    for result in join_all(tasks).await {
        result.context("a page reading task failed")?;
    }

    Ok(registry.len())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}
