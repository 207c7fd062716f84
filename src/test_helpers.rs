//! Shared test utilities for the simple-press test suite.
//!
//! [`setup_site`] builds an isolated site skeleton in a temp directory —
//! source dir, posts dir with the shared template, an empty index page —
//! that tests mutate freely. The fixture template and index carry exactly
//! the slot elements the real hand-authored files do.

use crate::config::{SiteConfig, SitePaths};
use std::fs;
use tempfile::TempDir;

pub const TEMPLATE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Template</title>
</head>
<body>
<article class="post">
<h1 class="post-title">Placeholder</h1>
<p class="post-date">Jan 01, 1970</p>
<div class="post-content"><p>Placeholder body</p></div>
</article>
</body>
</html>
"#;

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>nicolasleao.me</title>
</head>
<body>
<main>
<ul class="post-list">
</ul>
</main>
</body>
</html>
"#;

/// An isolated site rooted in a temp directory.
pub struct TestSite {
    pub config: SiteConfig,
    pub paths: SitePaths,
    _tmp: TempDir,
}

/// Create a site skeleton with the default layout.
pub fn setup_site() -> TestSite {
    let tmp = TempDir::new().unwrap();
    let config = SiteConfig::default();
    let paths = config.resolve(tmp.path());
    fs::create_dir_all(&paths.source_dir).unwrap();
    fs::create_dir_all(&paths.posts_dir).unwrap();
    fs::write(&paths.template_file, TEMPLATE_HTML).unwrap();
    fs::write(&paths.index_file, INDEX_HTML).unwrap();
    TestSite { config, paths, _tmp: tmp }
}

impl TestSite {
    /// Write a markdown source document for `slug`.
    pub fn write_source(&self, slug: &str, content: &str) {
        fs::write(
            self.paths.source_dir.join(format!("{slug}.md")),
            content,
        )
        .unwrap();
    }

    /// Drop a pre-existing generated page for `slug`, content irrelevant.
    pub fn write_page(&self, slug: &str) {
        fs::write(
            self.paths.posts_dir.join(format!("{slug}.html")),
            "<html><body>previously generated</body></html>",
        )
        .unwrap();
    }

    pub fn read_page(&self, slug: &str) -> String {
        fs::read_to_string(self.paths.posts_dir.join(format!("{slug}.html"))).unwrap()
    }

    /// Seed the index with an existing entry, as a previous build would.
    pub fn write_index_entry(&self, slug: &str, title: &str) {
        let index = fs::read_to_string(&self.paths.index_file).unwrap();
        let entry = format!(
            "<ul class=\"post-list\">\n<li class=\"post-item\"><a href=\"posts/{slug}.html\" class=\"post-title\" target=\"_blank\">{title}</a><span class=\"post-date\">Jan 01, 2020</span></li>"
        );
        let updated = index.replace("<ul class=\"post-list\">", &entry);
        fs::write(&self.paths.index_file, updated).unwrap();
    }
}
