// src/crawl/mod.rs
// =============================================================================
// This module runs the two concurrent phases of a check.
//
// 1. Discovery (walk.rs): one task per markdown file reads the page and
//    registers it. A barrier waits for all of them.
// 2. Validation (below): one task per page checks that page's links against
//    the now complete registry. A second barrier waits for all of them.
//
// During validation the registry is only read. Each task works on its own
// copy of its page's links and hands it back; the links are written back to
// their owning page, by path, after the barrier.
//
// A failing page or link never stops the others; everything is collected
// and reported at the end.
// =============================================================================

mod walk;

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;

use crate::checker::validate_page;
use crate::config::SiteConfig;
use crate::site::{Page, Registry};
use crate::{debug, log};

pub use walk::discover;

// Checks a whole site and returns its pages, sorted by path
pub async fn check_site(config: SiteConfig) -> Result<Vec<Page>> {
    let config = Arc::new(config);
    let registry = Arc::new(Registry::new());

    log!("walk"; "reading files from {}", config.root.display());
    let found = discover(Arc::clone(&config), Arc::clone(&registry)).await?;
    log!("walk"; "{} pages read", found);

    let validated = validate_all(Arc::clone(&config), Arc::clone(&registry)).await?;
    log!("validate"; "{} pages validated", validated);

    Ok(registry.pages())
}

// Validates every registered page concurrently
//
// Returns: the number of pages whose links were checked
pub async fn validate_all(config: Arc<SiteConfig>, registry: Arc<Registry>) -> Result<usize> {
    let tasks = registry.paths().into_iter().map(|path| {
        let config = Arc::clone(&config);
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let links = validate_page(&config, &registry, &path).await;
            (path, links)
        })
    });

    let mut validated = 0;
    for result in join_all(tasks).await {
        let (path, links) = result.context("a page validation task failed")?;
        if let Some(links) = links {
            debug!("validate"; "{}: {} links checked", path.display(), links.len());
            registry.set_links(&path, links);
            validated += 1;
        }
    }

    Ok(validated)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc?
//    - tokio::spawn needs 'static data: a task may outlive the caller's stack
//    - Arc (atomically reference counted) lets every task share the same
//      config and registry; Arc::clone only bumps a counter
//
// 2. What does join_all do?
//    - Waits until every future in the list has completed
//    - Here the futures are JoinHandles, so it is our barrier between phases
//    - A JoinHandle resolves to Err only if the task panicked
//
// 3. Why return the links instead of editing the page in the task?
//    - The task never holds a lock while it awaits file system checks
//    - Only one place writes page data during validation: the loop after
//      the barrier, one page at a time
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Report;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let config = SiteConfig::new(&root, "hugo", vec!["en".to_string()]);
        let en = config.language_dir("en");

        write(
            &en.join("test.md"),
            "# Test Page\n\n\
             [another](another)\n\
             [invalid](invalid)\n\
             [self](#missing)\n\
             [top](#test-page)\n",
        );
        write(&en.join("another.md"), "# Another\n\n[back](test#test-page)\n");
        write(&en.join("folder/_index.md"), "## Section One\n");
        write(&root.join("README.md"), "[docs](other.md)\n[site](https://example.com)\n");
        (dir, config)
    }

    #[tokio::test]
    async fn test_check_site() {
        let (_dir, config) = site();
        let en = config.language_dir("en");

        let pages = check_site(config.clone()).await.unwrap();
        assert_eq!(pages.len(), 4);

        let test = pages.iter().find(|p| p.path == en.join("test.md")).unwrap();
        let errors: Vec<_> = test
            .links
            .iter()
            .filter_map(|l| l.fatal_error.as_ref().map(|e| (l.raw.as_str(), e.to_string())))
            .collect();
        assert_eq!(
            errors,
            vec![
                (
                    "invalid",
                    "the link resolves to /hugo/content/en/invalid.md which does not exist"
                        .to_string()
                ),
                (
                    "#missing",
                    "#missing does not exist in /hugo/content/en/test.md".to_string()
                ),
            ]
        );

        let another = pages.iter().find(|p| p.path == en.join("another.md")).unwrap();
        assert_eq!(another.error_count(), 0);

        let readme = pages.iter().find(|p| !p.is_localized).unwrap();
        assert_eq!(
            readme.links[0].fatal_error.as_ref().unwrap().to_string(),
            "scheme is required on links outside the hugo website"
        );
        assert!(readme.links[1].is_ok());
    }

    #[tokio::test]
    async fn test_two_runs_give_identical_reports() {
        let (_dir, config) = site();

        let first = Report::new(check_site(config.clone()).await.unwrap(), false).render_text();
        let second = Report::new(check_site(config).await.unwrap(), false).render_text();

        assert_eq!(first, second);
    }
}
