// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI is a plain struct and clap generates the
// parsing code (and --help / --version) from the field attributes.
// =============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::SiteConfig;

#[derive(Parser, Debug)]
#[command(
    name = "linkcheck",
    version,
    about = "Check links and anchors across the markdown pages of a hugo website",
    long_about = "linkcheck walks a directory, reads every markdown page and checks that each \
                  link points to an existing page and, when it has one, to an existing anchor. \
                  Pages inside the hugo content folder must follow the site linking \
                  conventions; pages outside it may only use fully qualified URLs."
)]
pub struct Cli {
    /// Root path to walk for markdown files
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Path of the folder containing the hugo website, relative to root
    /// (defaults to root itself)
    #[arg(long)]
    pub hugo_folder: Option<PathBuf>,

    /// Languages supported by the hugo website (one folder each under content/)
    #[arg(long, value_delimiter = ',', num_args = 1.., default_value = "en")]
    pub hugo_languages: Vec<String>,

    /// List every page and every valid link, and print debug messages
    #[arg(long)]
    pub verbose: bool,

    /// Output the report in JSON format instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    // Builds the run settings, turning root into an absolute, canonical path
    pub fn site_config(&self) -> Result<SiteConfig> {
        let root = self
            .root
            .canonicalize()
            .with_context(|| format!("failed to resolve root {}", self.root.display()))?;
        Ok(SiteConfig::new(
            root,
            self.hugo_folder.clone().unwrap_or_default(),
            self.hugo_languages.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["linkcheck"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.hugo_folder, None);
        assert_eq!(cli.hugo_languages, vec!["en".to_string()]);
        assert!(!cli.verbose);
        assert!(!cli.json);
    }

    #[test]
    fn test_languages_are_comma_separated() {
        let cli = Cli::parse_from([
            "linkcheck",
            "--hugo-folder",
            "docs/book",
            "--hugo-languages",
            "en,zh",
            "--verbose",
        ]);
        assert_eq!(cli.hugo_folder, Some(PathBuf::from("docs/book")));
        assert_eq!(cli.hugo_languages, vec!["en".to_string(), "zh".to_string()]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_site_config_makes_root_absolute() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = Cli::parse_from(["linkcheck", "--root", dir.path().to_str().unwrap()]);
        let config = cli.site_config().unwrap();
        assert!(config.root.is_absolute());
        assert_eq!(config.root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_site_config_with_missing_root() {
        let cli = Cli::parse_from(["linkcheck", "--root", "/definitely/not/here"]);
        assert!(cli.site_config().is_err());
    }
}
