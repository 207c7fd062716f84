//! Change detection: which sources need rendering, and why.
//!
//! Compares the source directory against the generated pages and the
//! metadata store to classify every source document:
//!
//! - **new** — no generated page exists for the slug yet
//! - **stale** — a page exists, but the post's recorded version differs
//!   from the store's global version (or the post has no record at all)
//! - **unchanged** — a page exists and the versions match; skipped
//!
//! With `force`, every source with an existing page is re-rendered
//! regardless of version. Sources are ordered lexicographically by
//! filename — directory-listing order is not stable across platforms, so
//! the order is pinned explicitly.
//!
//! Missing `src/` and `posts/` directories are created rather than
//! reported, so a first build in an empty site root just works.

use crate::config::{SiteConfig, SitePaths};
use crate::store::PostData;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One source document to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Filename stem — the post's identity key.
    pub slug: String,
    pub source: PathBuf,
    pub target: PathBuf,
    /// True when a page already exists for this slug. Updates keep their
    /// original publication date and never produce index entries.
    pub is_update: bool,
}

/// Produce the ordered jobs for a build: new sources plus stale ones
/// (or every existing one, under `force`).
pub fn plan(
    paths: &SitePaths,
    config: &SiteConfig,
    store: &PostData,
    force: bool,
) -> Result<Vec<RenderJob>, DetectError> {
    let mut jobs = Vec::new();
    for source in sources(paths, config)? {
        let slug = slug_of(&source);
        let target = paths.posts_dir.join(format!("{slug}.html"));
        if !target.exists() {
            jobs.push(RenderJob {
                slug,
                source,
                target,
                is_update: false,
            });
        } else if force || is_stale(store, &slug) {
            jobs.push(RenderJob {
                slug,
                source,
                target,
                is_update: true,
            });
        }
    }
    Ok(jobs)
}

/// Produce jobs for every source document, all marked as updates. Used by
/// `regenerate`, which bypasses version comparison entirely.
pub fn full_plan(paths: &SitePaths, config: &SiteConfig) -> Result<Vec<RenderJob>, DetectError> {
    Ok(sources(paths, config)?
        .into_iter()
        .map(|source| {
            let slug = slug_of(&source);
            let target = paths.posts_dir.join(format!("{slug}.html"));
            RenderJob {
                slug,
                source,
                target,
                is_update: true,
            }
        })
        .collect())
}

/// A post is stale when its recorded version differs from the global one.
/// A post with no record has an unknown version, which counts as stale.
fn is_stale(store: &PostData, slug: &str) -> bool {
    store
        .record(slug)
        .map(|record| record.version != store.version)
        .unwrap_or(true)
}

/// All source documents, sorted by filename.
fn sources(paths: &SitePaths, config: &SiteConfig) -> Result<Vec<PathBuf>, DetectError> {
    fs::create_dir_all(&paths.source_dir)?;
    fs::create_dir_all(&paths.posts_dir)?;

    let mut sources: Vec<PathBuf> = fs::read_dir(&paths.source_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case(&config.source_ext))
                    .unwrap_or(false)
        })
        .collect();
    sources.sort();
    Ok(sources)
}

fn slug_of(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}
