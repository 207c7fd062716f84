//! Site configuration module.
//!
//! Handles loading `press.toml` from the site root. Every option has a
//! default matching the conventional blog layout, so a site with no config
//! file at all builds exactly like one with an empty `press.toml`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "src"                # Markdown sources
//! posts_dir = "posts"               # Generated pages + shared template
//! index_file = "index.html"         # Site index at the site root
//! data_file = "post-data.json"      # Per-post metadata store
//! template_file = "_template.html"  # Shared page template, inside posts_dir
//! title_suffix = "Nicolas Leao"     # "<post title> - <suffix>" in <title>
//! source_ext = "md"                 # Source file extension
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the site root.
pub const CONFIG_FILENAME: &str = "press.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Site configuration loaded from `press.toml`.
///
/// All fields have defaults. User config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory of markdown source documents, relative to the site root.
    pub source_dir: String,
    /// Directory of generated pages (and the shared template).
    pub posts_dir: String,
    /// Site index page, relative to the site root.
    pub index_file: String,
    /// Metadata store file, relative to the site root.
    pub data_file: String,
    /// Shared page template filename, inside `posts_dir`.
    pub template_file: String,
    /// Appended to every page's `<title>` as `"{title} - {suffix}"`.
    pub title_suffix: String,
    /// Source file extension, matched case-insensitively.
    pub source_ext: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            posts_dir: "posts".to_string(),
            index_file: "index.html".to_string(),
            data_file: "post-data.json".to_string(),
            template_file: "_template.html".to_string(),
            title_suffix: "Nicolas Leao".to_string(),
            source_ext: "md".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load config from `<root>/press.toml`, falling back to defaults when
    /// the file doesn't exist. A file that exists but fails to parse is an
    /// error — silently building with defaults would mask typos.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILENAME);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the configured names against a site root directory.
    pub fn resolve(&self, root: &Path) -> SitePaths {
        SitePaths {
            source_dir: root.join(&self.source_dir),
            posts_dir: root.join(&self.posts_dir),
            index_file: root.join(&self.index_file),
            data_file: root.join(&self.data_file),
            template_file: root.join(&self.posts_dir).join(&self.template_file),
        }
    }
}

/// Root-resolved locations of everything the pipeline touches.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub source_dir: PathBuf,
    pub posts_dir: PathBuf,
    pub index_file: PathBuf,
    pub data_file: PathBuf,
    pub template_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = SiteConfig::default();
        assert_eq!(config.source_dir, "src");
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.index_file, "index.html");
        assert_eq!(config.data_file, "post-data.json");
        assert_eq!(config.template_file, "_template.html");
        assert_eq!(config.source_ext, "md");
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::load(tmp.path()).unwrap();
        assert_eq!(config.source_dir, "src");
    }

    #[test]
    fn partial_config_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "title_suffix = \"My Blog\"\n",
        )
        .unwrap();
        let config = SiteConfig::load(tmp.path()).unwrap();
        assert_eq!(config.title_suffix, "My Blog");
        assert_eq!(config.source_dir, "src");
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILENAME), "sourcedir = \"x\"\n").unwrap();
        assert!(SiteConfig::load(tmp.path()).is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILENAME), "source_dir = [broken").unwrap();
        assert!(SiteConfig::load(tmp.path()).is_err());
    }

    #[test]
    fn resolve_joins_against_root() {
        let config = SiteConfig::default();
        let paths = config.resolve(Path::new("/site"));
        assert_eq!(paths.source_dir, Path::new("/site/src"));
        assert_eq!(paths.template_file, Path::new("/site/posts/_template.html"));
        assert_eq!(paths.index_file, Path::new("/site/index.html"));
    }
}
