// src/checker/validate.rs
// =============================================================================
// This module checks that every resolved site link points to something real.
//
// For each link of a page (skipping links that already failed to resolve):
// 1. the target file must exist on disk
// 2. the target must have been read during discovery (it is in the registry)
// 3. if the link has an anchor, the target page must declare it
//
// External links are accepted without any request: checking that remote
// URLs are reachable is out of scope.
//
// Validation never fails as a whole. Problems are recorded on the link.
// =============================================================================

use std::path::Path;

use crate::config::SiteConfig;
use crate::error::LinkError;
use crate::site::{Link, LinkTarget, Registry};

// Validates the links of the page at `path` against the registry
//
// Returns the validated copy of the links, or None when the page is unknown
// or carries a fatal error (its links are then never checked).
pub async fn validate_page(
    config: &SiteConfig,
    registry: &Registry,
    path: &Path,
) -> Option<Vec<Link>> {
    let mut links = registry.checkable_links(path)?;

    for link in links.iter_mut().filter(|l| l.is_ok()) {
        if let Err(error) = check_link(config, registry, link).await {
            link.fatal_error = Some(error);
        }
    }

    Some(links)
}

async fn check_link(
    config: &SiteConfig,
    registry: &Registry,
    link: &Link,
) -> Result<(), LinkError> {
    let Some(LinkTarget::Local { path, anchor }) = &link.target else {
        return Ok(());
    };

    let exists = tokio::fs::try_exists(path).await.unwrap_or(false);
    if !exists {
        return Err(LinkError::Missing(config.display_path(path)));
    }

    match anchor {
        None if registry.contains(path) => Ok(()),
        Some(anchor) => match registry.has_anchor(path, anchor) {
            Some(true) => Ok(()),
            Some(false) => Err(LinkError::MissingAnchor {
                anchor: anchor.clone(),
                page: config.display_path(path),
            }),
            None => Err(LinkError::NotRegistered(config.display_path(path))),
        },
        None => Err(LinkError::NotRegistered(config.display_path(path))),
    }
}
