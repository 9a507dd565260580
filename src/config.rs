// src/config.rs
// =============================================================================
// Settings shared by every phase of a run.
//
// The website layout is:
//
//   <root>/<hugo_folder>/content/<language>/...
//
// where <root> is the directory being walked, <hugo_folder> is the folder
// holding the hugo website (possibly empty) and <language> is one of the
// configured language codes.
// =============================================================================

use std::path::{Path, PathBuf};

// Name of the folder holding the localized content inside the website
pub const CONTENT_FOLDER: &str = "content";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Absolute path of the directory to walk
    pub root: PathBuf,
    /// Folder of the hugo website, relative to root
    pub hugo_folder: PathBuf,
    /// Language codes with a subtree under the content folder
    pub languages: Vec<String>,
}

impl SiteConfig {
    pub fn new(
        root: impl Into<PathBuf>,
        hugo_folder: impl Into<PathBuf>,
        languages: Vec<String>,
    ) -> Self {
        Self {
            root: root.into(),
            hugo_folder: hugo_folder.into(),
            languages,
        }
    }

    // <root>/<hugo_folder>/content
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.hugo_folder).join(CONTENT_FOLDER)
    }

    // <root>/<hugo_folder>/content/<language>
    pub fn language_dir(&self, language: &str) -> PathBuf {
        self.content_dir().join(language)
    }

    // Shows a path relative to root, e.g. "/hugo/content/en/test.md".
    // Paths outside root are shown as they are.
    pub fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => format!("/{}", rel.display()),
            Err(_) => path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_dir() {
        let config = SiteConfig::new("/root", "hugo", vec!["en".to_string()]);
        assert_eq!(config.content_dir(), PathBuf::from("/root/hugo/content"));
        assert_eq!(config.language_dir("en"), PathBuf::from("/root/hugo/content/en"));
    }

    #[test]
    fn test_content_dir_without_hugo_folder() {
        let config = SiteConfig::new("/root", "", vec!["en".to_string()]);
        assert_eq!(config.content_dir(), PathBuf::from("/root/content"));
    }

    #[test]
    fn test_display_path() {
        let config = SiteConfig::new("/root", "hugo", vec!["en".to_string()]);
        assert_eq!(
            config.display_path(Path::new("/root/hugo/content/en/test.md")),
            "/hugo/content/en/test.md"
        );
        assert_eq!(config.display_path(Path::new("/elsewhere/a.md")), "/elsewhere/a.md");
    }
}
