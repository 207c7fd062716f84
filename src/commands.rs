//! Command orchestration.
//!
//! One function per CLI action, wiring detector → renderer → index
//! updater around an explicitly loaded and saved store. Keeping the
//! orchestration here (rather than in `main`) lets the whole pipeline run
//! against a temp directory in tests, clock included — `today` is always
//! a parameter.
//!
//! The store is saved once, after the batch. A build that finds nothing
//! to do touches neither the store file nor the index, so an idle rebuild
//! leaves both byte-identical.

use crate::config::{SiteConfig, SitePaths};
use crate::detect::{self, DetectError};
use crate::index::{self, IndexError};
use crate::render::{self, RenderError, RenderedPage};
use crate::store::{PostData, StoreError};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// What a build (or regenerate) run did.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Every page rendered, in render order.
    pub pages: Vec<RenderedPage>,
    /// Index entries added (new pages only; always 0 for regenerate).
    pub index_added: usize,
}

/// Convert new and stale sources; add index entries for the new ones.
pub fn build(
    config: &SiteConfig,
    paths: &SitePaths,
    force: bool,
    today: NaiveDate,
) -> Result<BuildReport, CommandError> {
    let mut store = PostData::load(&paths.data_file)?;
    let jobs = detect::plan(paths, config, &store, force)?;
    if jobs.is_empty() {
        return Ok(BuildReport::default());
    }

    let mut pages = Vec::with_capacity(jobs.len());
    for job in &jobs {
        pages.push(render::render(job, paths, config, &mut store, today)?);
    }

    let new_pages: Vec<RenderedPage> = pages.iter().filter(|p| !p.is_update).cloned().collect();
    let index_added = index::update(&paths.index_file, &new_pages)?;
    store.save(&paths.data_file)?;

    Ok(BuildReport { pages, index_added })
}

/// Re-render every source in place: dates preserved, no index entries.
pub fn regenerate(
    config: &SiteConfig,
    paths: &SitePaths,
    today: NaiveDate,
) -> Result<BuildReport, CommandError> {
    let mut store = PostData::load(&paths.data_file)?;
    let jobs = detect::full_plan(paths, config)?;
    if jobs.is_empty() {
        return Ok(BuildReport::default());
    }

    let mut pages = Vec::with_capacity(jobs.len());
    for job in &jobs {
        pages.push(render::render(job, paths, config, &mut store, today)?);
    }
    store.save(&paths.data_file)?;

    Ok(BuildReport {
        pages,
        index_added: 0,
    })
}

/// Set the global version. Returns false when it was already current (and
/// the store file is left untouched).
pub fn set_version(paths: &SitePaths, new_version: &str) -> Result<bool, CommandError> {
    let mut store = PostData::load(&paths.data_file)?;
    if !store.bump_version(new_version) {
        return Ok(false);
    }
    store.save(&paths.data_file)?;
    Ok(true)
}
