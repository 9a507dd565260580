// src/checker/markdown.rs
// =============================================================================
// This module extracts anchors and links from Markdown text.
//
// No full Markdown parser is needed: the site only relies on three patterns,
// matched with the `regex` crate:
// - headers:          # Some Title           -> anchor "some-title"
// - inline links:     [text](target)         (images ![alt](src) are skipped)
// - reference links:  [id]: target           (on their own line)
//
// Regexes are compiled once, on first use, through once_cell's Lazy.
//
// Rust concepts:
// - Iterators: captures_iter, filter_map and collect build the results
// - Borrowing: matches are &str slices of the page text, copied only at the end
// - Sets: HashSet drops repeated anchors and repeated links
// =============================================================================

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

// Markdown headers. (?m) makes ^ and $ match at line boundaries.
static HEADER_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*#+\s*(.+)$").expect("valid header regex"));

// Inline links [text](addr), capturing a leading '!' so images can be dropped.
static INLINE_LINK_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[[^\]]+\]\(([^)]+)\)").expect("valid inline link regex"));

// Reference link definitions [id]: addr
static REFERENCE_LINK_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\[[^\]]+\]:\s+(.+)$").expect("valid reference link regex"));

// A link expression as found in the page, with the line of its first occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub raw: String,
    pub line: usize,
}

// Turns a header text into the anchor hugo generates for it
//
// Example: "My Title" -> "my-title", "Input/Output" -> "inputoutput"
pub fn anchor_for(header: &str) -> String {
    // Each step returns a new String, so the calls chain
    header
        .trim()
        .to_lowercase()
        .replace(' ', "-")
        .replace('/', "")
}

// Extracts the anchors declared by the headers of a page
//
// Repeated headers produce a single entry; no "-1", "-2" suffixes are added.
pub fn extract_anchors(markdown: &str) -> HashSet<String> {
    HEADER_RX
        .captures_iter(markdown)
        // Group 1 is the header text after the '#'s
        .filter_map(|caps| caps.get(1))
        .map(|m| anchor_for(m.as_str()))
        .collect()
}

// Extracts the links of a page, in source order, each raw string only once
//
// Example input:
//   "See [docs](docs) and [more](docs)\n[ref]: https://example.com"
//
// Example output:
//   [RawLink { raw: "docs", line: 1 }, RawLink { raw: "https://example.com", line: 2 }]
pub fn extract_links(markdown: &str) -> Vec<RawLink> {
    // (byte offset, raw link)
    let mut found: Vec<(usize, &str)> = Vec::new();

    // Inline links: group 1 is the optional '!', group 2 the address
    for caps in INLINE_LINK_RX.captures_iter(markdown) {
        let is_image = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        if is_image {
            continue;
        }
        if let Some(m) = caps.get(2) {
            found.push((m.start(), m.as_str()));
        }
    }

    // Reference definitions: group 1 is everything after "[id]:"
    for caps in REFERENCE_LINK_RX.captures_iter(markdown) {
        if let Some(m) = caps.get(1) {
            // Drop a trailing \r left by CRLF line endings
            found.push((m.start(), m.as_str().trim_end()));
        }
    }

    // The two passes are merged back into source order
    found.sort_by_key(|(offset, _)| *offset);

    let lines = LineIndex::new(markdown);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut links = Vec::new();
    for (offset, raw) in found {
        // insert() returns false when the raw link was already seen,
        // so only the first occurrence is kept
        if seen.insert(raw) {
            links.push(RawLink {
                raw: raw.to_string(),
                line: lines.line_of(offset),
            });
        }
    }
    links
}

// Maps byte offsets to 1-based line numbers
struct LineIndex {
    // Offsets where each line starts
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        // Line 1 starts at 0, every other line right after a '\n'
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        // Ok(i): offset is the start of line i + 1
        // Err(i): offset is inside the line starting at starts[i - 1]
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Lazy for the regexes?
//    - Regex::new compiles the pattern, which is slow compared to matching
//    - A static Lazy compiles it on first use and shares it between all tasks
//    - Lazy<Regex> is Sync, so any thread can use it without a lock
//
// 2. Why does extract_links return RawLink and not Link?
//    - This module only knows about text; resolving needs the page and config
//    - checker::read_page feeds every RawLink to resolve_link
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(links: &[RawLink]) -> Vec<&str> {
        links.iter().map(|l| l.raw.as_str()).collect()
    }

    #[test]
    fn test_anchor_for_header() {
        assert_eq!(anchor_for("My Title"), "my-title");
        assert_eq!(anchor_for("  Input/Output Stream "), "inputoutput-stream");
    }

    #[test]
    fn test_extract_anchors() {
        let markdown = "# My Title\n\nsome text\n\n## Getting Started\n### Sub/Section\n";
        let anchors = extract_anchors(markdown);
        assert_eq!(anchors.len(), 3);
        assert!(anchors.contains("my-title"));
        assert!(anchors.contains("getting-started"));
        assert!(anchors.contains("subsection"));
    }

    #[test]
    fn test_repeated_headers_collapse() {
        let anchors = extract_anchors("# Usage\n\n# Usage\n");
        assert_eq!(anchors.len(), 1);
        assert!(anchors.contains("usage"));
    }

    #[test]
    fn test_extract_simple_link() {
        let links = extract_links("Check out [Rust](https://www.rust-lang.org)!");
        assert_eq!(
            links,
            vec![RawLink {
                raw: "https://www.rust-lang.org".to_string(),
                line: 1
            }]
        );
    }

    #[test]
    fn test_link_at_start_of_text() {
        let links = extract_links("[another](another) page");
        assert_eq!(raws(&links), vec!["another"]);
    }

    #[test]
    fn test_skip_image_links() {
        let links = extract_links("![logo](images/logo.png) and [page](page)");
        assert_eq!(raws(&links), vec!["page"]);
    }

    #[test]
    fn test_reference_links() {
        let markdown = "Read the [guide][g].\n\n[g]: ../guide#install\n";
        let links = extract_links(markdown);
        assert_eq!(
            links,
            vec![RawLink {
                raw: "../guide#install".to_string(),
                line: 3
            }]
        );
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let markdown = r#"
# Resources

- [one](another)
- [two](https://example.com)
- [three](another)

[four]: another
"#;
        let links = extract_links(markdown);
        assert_eq!(raws(&links), vec!["another", "https://example.com"]);
        assert_eq!(links[0].line, 4);
        assert_eq!(links[1].line, 5);
    }

    #[test]
    fn test_links_in_source_order() {
        let markdown = "[a]: first\n\nthen [b](second)\n";
        let links = extract_links(markdown);
        assert_eq!(raws(&links), vec!["first", "second"]);
    }

    #[test]
    fn test_adjacent_links() {
        let links = extract_links("[a](one)[b](two)");
        assert_eq!(raws(&links), vec!["one", "two"]);
    }
}
