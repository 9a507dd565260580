// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - markdown: Extracts anchors and links from markdown text
// - resolve: Turns a raw link into an external URL or a file in the tree
// - validate: Checks resolved links against the pages found on disk
//
// This file (mod.rs) is the module root - it re-exports the functions the
// crawl phases need, plus `read_page`, which runs extraction and resolution
// for one file.
// =============================================================================

mod markdown;
mod resolve;
mod validate;

use std::path::PathBuf;

pub use markdown::{extract_anchors, extract_links};
pub use resolve::resolve_link;
pub use validate::validate_page;

use crate::config::SiteConfig;
use crate::error::PageError;
use crate::site::Page;

// Reads a markdown file and builds its Page: classification, anchors and
// resolved links. Failures end up in the page's fatal error.
pub async fn read_page(config: &SiteConfig, path: PathBuf) -> Page {
    let mut page = Page::locate(config, path);
    if !page.is_ok() {
        return page;
    }

    let content = match tokio::fs::read_to_string(&page.path).await {
        Ok(content) => content,
        Err(e) => {
            page.fatal_error = Some(PageError::Read(e.to_string()));
            return page;
        }
    };

    page.anchors = extract_anchors(&content);
    let links: Vec<_> = extract_links(&content)
        .into_iter()
        .map(|l| resolve_link(config, &page, &l.raw, l.line))
        .collect();
    page.links = links;
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::LinkTarget;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_page() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::new(dir.path(), "", vec!["en".to_string()]);
        let path = config.language_dir("en").join("test.md");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "# My Title\n\nSee [another](another), [self](#my-title) and ![img](logo.png).\n",
        )
        .unwrap();

        let page = read_page(&config, path.clone()).await;
        assert!(page.is_ok());
        assert_eq!(page.language, "en");
        assert!(page.has_anchor("my-title"));
        assert_eq!(page.links.len(), 2);
        assert_eq!(page.links[0].raw, "another");
        assert_eq!(
            page.links[1].target,
            Some(LinkTarget::Local {
                path: path.clone(),
                anchor: Some("my-title".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_read_page_with_unknown_language() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::new(dir.path(), "", vec!["en".to_string()]);
        let path = config.language_dir("it").join("test.md");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[a](a)").unwrap();

        let page = read_page(&config, path).await;
        assert!(page.fatal_error.is_some());
        assert!(page.links.is_empty());
    }

    #[tokio::test]
    async fn test_read_page_that_does_not_exist() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::new(dir.path(), "", vec!["en".to_string()]);

        let page = read_page(&config, dir.path().join("gone.md")).await;
        let error = page.fatal_error.unwrap().to_string();
        assert!(error.starts_with("error reading content:"), "{}", error);
    }
}
