// src/checker/resolve.rs
// =============================================================================
// This module turns a raw link into the target it points to.
//
// Links with a scheme (https://, mailto:, ...) are external and kept as they
// are. Links without a scheme point to another page of the website and follow
// the site conventions:
// - they are only allowed on pages inside the localized content folder
// - ref/refLink shortcodes are not allowed, plain paths must be used instead
// - "#anchor" points to an anchor of the current page
// - paths are relative to the current page, or to the language folder when
//   they start with '/'
// - the .md extension is omitted: "another" -> another.md
// - directories are linked by name, never through "_index.md":
//   "folder" -> folder/_index.md
//
// Example (page content/en/folder/test.md):
//   "another#anchor"  -> <root>/content/en/folder/another.md#anchor
//   "/folder"         -> <root>/content/en/folder/_index.md
//
// Rust concepts:
// - Result<T, E> with `?`: each rule can stop resolution with its own error
// - match on enums: url::ParseError tells relative links apart
// - Path vs PathBuf: borrowed vs owned paths, joined and cleaned lexically
// =============================================================================

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::config::SiteConfig;
use crate::error::LinkError;
use crate::site::{Link, LinkTarget, Page, ANCHOR_SEPARATOR};

// Extension of the pages, omitted in links
const MARKDOWN_EXTENSION: &str = ".md";

// Page rendered for a directory
const INDEX_FILE: &str = "_index.md";

// Matches {{< tag "value" >}} as a whole link, capturing tag and value
static SHORTCODE_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*\{\{<\s*([\S#]+)\s+"([^\s=]+)"\s*>\}\}\s*$"#).expect("valid shortcode regex")
});

// The parts of a link without scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParts {
    pub path: String,
    pub fragment: Option<String>,
    /// Language of the target page. Nothing sets it today: the shortcodes
    /// that could carry a language are rejected, so links always stay in
    /// the language of their page.
    pub language: Option<String>,
}

// Resolves one raw link found on `page`
//
// The returned Link has either a target or a fatal error, never both.
pub fn resolve_link(config: &SiteConfig, page: &Page, raw: &str, line: usize) -> Link {
    match resolve_target(config, page, raw) {
        Ok(target) => Link::resolved(raw, line, target),
        Err(error) => Link::failed(raw, line, error),
    }
}

fn resolve_target(config: &SiteConfig, page: &Page, raw: &str) -> Result<LinkTarget, LinkError> {
    // [text](page "title") -> page
    let addr = strip_title(raw.trim());

    // Anything with a scheme is an external link
    // Url::parse only succeeds on absolute URLs; a link without a scheme
    // fails with RelativeUrlWithoutBase, which is the case handled below
    match Url::parse(addr) {
        Ok(url) => return Ok(LinkTarget::External(url)),
        Err(url::ParseError::RelativeUrlWithoutBase) => {}
        Err(e) => return Err(LinkError::InvalidUrl(e.to_string())),
    }
    check_escapes(addr)?;

    // Pages outside the website are rendered by GitHub, not hugo
    if !page.is_localized {
        return Err(LinkError::SchemeRequired);
    }

    // Shortcodes are rejected here, before any path handling
    let parts = parse_link(addr)?;
    let anchor = parts.fragment.clone();

    // "#anchor" is an anchor defined on the page itself
    if parts.path.is_empty() {
        return Ok(LinkTarget::Local {
            path: page.path.clone(),
            anchor,
        });
    }

    // "#anchor", appended to the suggestions of the errors below
    let fragment_suffix = anchor
        .as_deref()
        .map(|a| format!("{}{}", ANCHOR_SEPARATOR, a))
        .unwrap_or_default();

    // "folder/_index.md" must be written "folder/"
    if Path::new(&parts.path).file_name() == Some(OsStr::new(INDEX_FILE)) {
        let dir = parts.path.strip_suffix(INDEX_FILE).unwrap_or_default();
        let dir = if dir.is_empty() { "./" } else { dir };
        return Err(LinkError::IndexFile(format!("{}{}", dir, fragment_suffix)));
    }

    // "page.md" must be written "page"
    if let Some(stem) = parts.path.strip_suffix(MARKDOWN_EXTENSION) {
        return Err(LinkError::Extension(format!("{}{}", stem, fragment_suffix)));
    }

    // Work out the path relative to the language folder:
    // "/a/b" starts at the language folder, "a/b" at the page's own folder
    let language = parts.language.as_deref().unwrap_or(&page.language);
    let relative = match parts.path.strip_prefix('/') {
        Some(from_language_root) => normalize(Path::new(from_language_root)),
        None => normalize(&page.relative_dir().join(&parts.path)),
    };
    let base = config.language_dir(language).join(&relative);

    // A directory links to its _index.md, anything else gets .md back.
    // is_dir() is a blocking stat: resolution is synchronous and runs inside
    // the page's discovery task, one stat per link.
    let path = if relative.as_os_str().is_empty() || base.is_dir() {
        base.join(INDEX_FILE)
    } else {
        with_markdown_extension(base)
    };

    Ok(LinkTarget::Local { path, anchor })
}

// Splits a link without scheme into its parts, rejecting shortcodes
pub fn parse_link(addr: &str) -> Result<LinkParts, LinkError> {
    // caps[1] is the shortcode name, caps[2] its quoted argument
    if let Some(caps) = SHORTCODE_RX.captures(addr) {
        if matches!(&caps[1], "ref" | "refLink") {
            // Suggest the plain link the shortcode stands for
            let (path, fragment) = split_path_and_fragment(&caps[2]);
            let suggestion = match fragment {
                Some(fragment) => format!("{}{}{}", path, ANCHOR_SEPARATOR, fragment),
                None => path,
            };
            return Err(LinkError::Shortcode(suggestion));
        }
    }

    // Any other link is a plain "path#fragment"
    let (path, fragment) = split_path_and_fragment(addr);
    Ok(LinkParts {
        path,
        fragment,
        language: None,
    })
}

// Splits "path#fragment" on the first '#'; an empty fragment counts as none
pub fn split_path_and_fragment(addr: &str) -> (String, Option<String>) {
    match addr.split_once(ANCHOR_SEPARATOR) {
        Some((path, fragment)) if !fragment.is_empty() => {
            (path.to_string(), Some(fragment.to_string()))
        }
        Some((path, _)) => (path.to_string(), None),
        None => (addr.to_string(), None),
    }
}

// Drops a link title: [text](page "a tooltip")
fn strip_title(addr: &str) -> &str {
    if addr.ends_with('"') {
        if let Some(i) = addr.find(" \"") {
            return addr[..i].trim_end();
        }
    }
    addr
}

// Every '%' must start a two-digit hex escape
fn check_escapes(addr: &str) -> Result<(), LinkError> {
    for (i, _) in addr.match_indices('%') {
        // '%' plus the two characters after it (fewer at the end of the link)
        let escape: String = addr[i..].chars().take(3).collect();
        let valid = escape.len() == 3 && escape.chars().skip(1).all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(LinkError::InvalidUrl(format!(
                "invalid URL escape \"{}\"",
                escape
            )));
        }
    }
    Ok(())
}

// Lexically cleans a relative path; ".." never climbs above the start
fn normalize(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => cleaned.push(part),
            // pop() on an empty path is a no-op, which is the clamp
            Component::ParentDir => {
                cleaned.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    cleaned
}

// "a/page" -> "a/page.md"
// Pushing onto the OsString keeps dots already in the name ("v1.2" -> "v1.2.md"),
// which Path::set_extension would replace
fn with_markdown_extension(path: PathBuf) -> PathBuf {
    let mut name = OsString::from(path);
    name.push(MARKDOWN_EXTENSION);
    PathBuf::from(name)
}
