// src/error.rs
// =============================================================================
// Fatal errors attached to pages and links.
//
// None of these errors are ever propagated with `?`: they are stored on the
// page or link they concern, which stops further processing of that one
// record, and they are only surfaced when the report is printed.
//
// The Display text (generated by thiserror from the #[error] attributes) is
// the exact message shown to the user.
// =============================================================================

use thiserror::Error;

// Errors that prevent a whole page from being processed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The page lives under the content folder but not under a known language
    #[error("hugo page {path} does not belong to one of the known languages: {known}")]
    UnknownLanguage { path: String, known: String },

    /// The file could not be read (or is not valid UTF-8)
    #[error("error reading content: {0}")]
    Read(String),

    /// The directory walk failed on this path
    #[error("error walking path {path}: {reason}")]
    Walk { path: String, reason: String },
}

// Errors that stop a single link from being resolved or validated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The link is not a valid URL
    #[error("error parsing url: {0}")]
    InvalidUrl(String),

    /// {{< ref "..." >}} / {{< refLink "..." >}} shortcodes are forbidden
    #[error("ref/refLink shortcodes must not be used, use \"{0}\" instead")]
    Shortcode(String),

    /// The link names a directory index page explicitly
    #[error("links must not end with _index.md, use \"{0}\" instead")]
    IndexFile(String),

    /// The link keeps the markdown extension
    #[error("links must not have extension .md, use \"{0}\" instead")]
    Extension(String),

    /// A page outside the website uses a link without scheme
    #[error("scheme is required on links outside the hugo website")]
    SchemeRequired,

    /// The resolved file is not on disk
    #[error("the link resolves to {0} which does not exist")]
    Missing(String),

    /// The target page has no header producing this anchor
    #[error("#{anchor} does not exist in {page}")]
    MissingAnchor { anchor: String, page: String },

    /// The target exists on disk but discovery never read it
    #[error("{0} has not been processed by linkcheck")]
    NotRegistered(String),
}
