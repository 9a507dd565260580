// src/site/page.rs
// =============================================================================
// The records a run works on: one Page per markdown file, one Link per
// distinct link found on that page.
//
// A Page also knows where it sits in the website. Creating a Page with
// `Page::locate` classifies the file:
// - outside <root>/<hugo_folder>/content/  -> not a localized page
// - under content/<language>/              -> localized, with language and
//                                             path relative to the language dir
// - under content/ but no known language   -> fatal classification error
// =============================================================================

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::config::SiteConfig;
use crate::error::{LinkError, PageError};

// Separator between the path and the anchor of a link
pub const ANCHOR_SEPARATOR: char = '#';

// Where a link points to once resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A URL with a scheme (https://, mailto:, ...), accepted as it is
    External(Url),
    /// An absolute path to a markdown file in the tree, with an optional anchor
    Local {
        path: PathBuf,
        anchor: Option<String>,
    },
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::External(url) => write!(f, "{}", url),
            LinkTarget::Local { path, anchor: None } => write!(f, "{}", path.display()),
            LinkTarget::Local {
                path,
                anchor: Some(anchor),
            } => write!(f, "{}{}{}", path.display(), ANCHOR_SEPARATOR, anchor),
        }
    }
}

// One link found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The link exactly as written in the page
    pub raw: String,
    /// 1-based line of the first occurrence
    pub line: usize,
    /// Resolved target; None when resolution failed
    pub target: Option<LinkTarget>,
    /// Set when parsing, resolution or validation failed
    pub fatal_error: Option<LinkError>,
}

impl Link {
    pub fn resolved(raw: impl Into<String>, line: usize, target: LinkTarget) -> Self {
        Self {
            raw: raw.into(),
            line,
            target: Some(target),
            fatal_error: None,
        }
    }

    pub fn failed(raw: impl Into<String>, line: usize, error: LinkError) -> Self {
        Self {
            raw: raw.into(),
            line,
            target: None,
            fatal_error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.fatal_error.is_none()
    }
}

// One markdown file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    /// Absolute path of the file, unique key in the registry
    pub path: PathBuf,
    /// True when the file is inside the content folder of the website
    pub is_localized: bool,
    /// Language of the page; empty when not localized or unknown
    pub language: String,
    /// Path relative to the language folder, e.g. "folder/test.md"
    pub relative_path: PathBuf,
    /// Anchors generated by the headers of the page
    pub anchors: HashSet<String>,
    /// Links in order of first appearance
    pub links: Vec<Link>,
    /// Set when the page can't be processed; its links are then never checked
    pub fatal_error: Option<PageError>,
}

impl Page {
    // Creates a page and classifies it against the website layout
    pub fn locate(config: &SiteConfig, path: impl Into<PathBuf>) -> Self {
        let mut page = Page {
            path: path.into(),
            ..Default::default()
        };

        let content_dir = config.content_dir();
        let Ok(in_content) = page.path.strip_prefix(&content_dir) else {
            return page;
        };
        page.is_localized = true;

        for language in &config.languages {
            if let Ok(rel) = page.path.strip_prefix(config.language_dir(language)) {
                page.language = language.clone();
                page.relative_path = rel.to_path_buf();
                return page;
            }
        }

        page.fatal_error = Some(PageError::UnknownLanguage {
            path: format!("/{}", in_content.display()),
            known: config.languages.join(", "),
        });
        page
    }

    pub fn with_error(path: impl Into<PathBuf>, error: PageError) -> Self {
        Page {
            path: path.into(),
            fatal_error: Some(error),
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.fatal_error.is_none()
    }

    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.anchors.contains(anchor)
    }

    // Number of links carrying a fatal error
    pub fn error_count(&self) -> usize {
        self.links.iter().filter(|l| !l.is_ok()).count()
    }

    // Folder of the page relative to its language folder
    pub fn relative_dir(&self) -> &Path {
        self.relative_path.parent().unwrap_or(Path::new(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        SiteConfig::new("/root", "hugo", vec!["en".to_string()])
    }

    #[test]
    fn test_page_outside_hugo_website() {
        let page = Page::locate(&config(), "/root/test.md");
        assert_eq!(
            page,
            Page {
                path: PathBuf::from("/root/test.md"),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_page_in_hugo_website() {
        let page = Page::locate(&config(), "/root/hugo/content/en/folder/test.md");
        assert!(page.is_localized);
        assert!(page.is_ok());
        assert_eq!(page.language, "en");
        assert_eq!(page.relative_path, PathBuf::from("folder/test.md"));
        assert_eq!(page.relative_dir(), Path::new("folder"));
    }

    #[test]
    fn test_page_with_unknown_language() {
        let page = Page::locate(&config(), "/root/hugo/content/it/test.md");
        assert!(page.is_localized);
        assert_eq!(page.language, "");
        assert_eq!(
            page.fatal_error.unwrap().to_string(),
            "hugo page /it/test.md does not belong to one of the known languages: en"
        );
    }

    #[test]
    fn test_language_prefix_is_matched_by_component() {
        // "english/" must not be taken for "en/"
        let page = Page::locate(&config(), "/root/hugo/content/english/test.md");
        assert!(page.fatal_error.is_some());
    }

    #[test]
    fn test_link_target_display() {
        let target = LinkTarget::Local {
            path: PathBuf::from("/root/hugo/content/en/test.md"),
            anchor: Some("anchor".to_string()),
        };
        assert_eq!(target.to_string(), "/root/hugo/content/en/test.md#anchor");
    }
}
