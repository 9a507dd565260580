// src/report.rs
// =============================================================================
// Builds the final report from the checked pages.
//
// Two formats:
// - text: one block per page, only pages with problems unless verbose
// - JSON: every page and link, for programmatic consumption
//
// Pages are always sorted by path, so the output does not depend on the
// order in which the concurrent tasks finished.
// =============================================================================

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::site::Page;

// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PROBLEMS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

pub struct Report {
    pages: Vec<Page>,
    verbose: bool,
}

// Counters printed at the end of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub pages: usize,
    pub links: usize,
    pub anchors: usize,
    pub problems: usize,
}

#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub pages: Vec<JsonPage>,
    pub totals: Totals,
}

#[derive(Serialize, Deserialize)]
pub struct JsonPage {
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub links: Vec<JsonLink>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonLink {
    pub raw: String,
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn new(mut pages: Vec<Page>, verbose: bool) -> Self {
        pages.sort_by(|a, b| a.path.cmp(&b.path));
        Self { pages, verbose }
    }

    // A problem is a page or a link carrying a fatal error
    pub fn totals(&self) -> Totals {
        let mut totals = Totals {
            pages: self.pages.len(),
            links: 0,
            anchors: 0,
            problems: 0,
        };
        for page in &self.pages {
            totals.links += page.links.len();
            totals.anchors += page.anchors.len();
            totals.problems += if page.is_ok() { page.error_count() } else { 1 };
        }
        totals
    }

    pub fn exit_code(&self) -> i32 {
        if self.totals().problems > 0 {
            EXIT_PROBLEMS
        } else {
            EXIT_SUCCESS
        }
    }

    // The text report; see the Display impl below
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    pub fn render_json(&self) -> Result<String> {
        let pages = self
            .pages
            .iter()
            .map(|page| JsonPage {
                path: page.path.display().to_string(),
                language: page.language.clone(),
                error: page.fatal_error.as_ref().map(|e| e.to_string()),
                links: page
                    .links
                    .iter()
                    .map(|link| JsonLink {
                        raw: link.raw.clone(),
                        line: link.line,
                        target: link.target.as_ref().map(|t| t.to_string()),
                        error: link.fatal_error.as_ref().map(|e| e.to_string()),
                    })
                    .collect(),
            })
            .collect();

        let report = JsonReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            pages,
            totals: self.totals(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

// Text format:
//
//   PAGE: /abs/path/page.md
//         3 links, 1 errors
//    - ERROR: raw (line 4): message
//
//   Total: ...
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in &self.pages {
            // Clean pages are only listed in verbose mode
            let has_problems = !page.is_ok() || page.error_count() > 0;
            if !(self.verbose || has_problems) {
                continue;
            }

            writeln!(f, "PAGE: {}", page.path.display())?;

            // A page error replaces the whole link list
            if let Some(error) = &page.fatal_error {
                writeln!(f, " - ERROR: {}", error)?;
                writeln!(f)?;
                continue;
            }

            match page.error_count() {
                0 => writeln!(f, "      {} links, no errors", page.links.len())?,
                errors => writeln!(f, "      {} links, {} errors", page.links.len(), errors)?,
            }
            for link in &page.links {
                match &link.fatal_error {
                    Some(error) => {
                        writeln!(f, " - ERROR: {} (line {}): {}", link.raw, link.line, error)?
                    }
                    None if self.verbose => {
                        writeln!(f, " - OK: {} (line {})", link.raw, link.line)?
                    }
                    None => {}
                }
            }
            writeln!(f)?;
        }

        let totals = self.totals();
        writeln!(
            f,
            "Total: {} pages, {} links, {} anchors processed, {} problems found",
            totals.pages, totals.links, totals.anchors, totals.problems
        )
    }
}
