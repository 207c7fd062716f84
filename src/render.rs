//! Page rendering.
//!
//! Turns one source document into a populated HTML page: extract the
//! title, convert the markdown, load the shared template, fill its slots,
//! write the target, and upsert the post's store record. The store is
//! mutated in memory only — the caller persists it once after the batch.
//!
//! ## Date policy
//!
//! A new page displays today's date. An update displays the stored
//! `created_at` when the post has a record, so re-rendering for a
//! template/version change never moves a post's visible publication date.
//! `today` is a parameter rather than a clock read, which keeps the
//! policy testable.

use crate::config::{SiteConfig, SitePaths};
use crate::detect::RenderJob;
use crate::markdown;
use crate::store::PostData;
use crate::template::{SlotDocument, TemplateError};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Outcome of rendering one page, as the index updater and progress
/// output need it.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub slug: String,
    pub target: PathBuf,
    pub title: String,
    pub display_date: String,
    pub is_update: bool,
}

/// Format a date the way pages and index entries display it.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Render one job into its target page and upsert the store record.
pub fn render(
    job: &RenderJob,
    paths: &SitePaths,
    config: &SiteConfig,
    store: &mut PostData,
    today: NaiveDate,
) -> Result<RenderedPage, RenderError> {
    let source_text = fs::read_to_string(&job.source)?;
    let title = markdown::extract_title(&source_text);
    let content = markdown::convert(&source_text);

    let shown_date = if job.is_update {
        store
            .record(&job.slug)
            .map(|record| record.created_at)
            .unwrap_or(today)
    } else {
        today
    };
    let shown_date = display_date(shown_date);

    let mut page = SlotDocument::load(&paths.template_file)?;
    page.set_title(&format!("{} - {}", title, config.title_suffix))?;
    page.fill_text("post-title", &title)?;
    page.fill_text("post-date", &shown_date)?;
    page.fill("post-content", &content)?;
    page.save(&job.target)?;

    store.upsert(&job.slug, today, job.is_update);

    Ok(RenderedPage {
        slug: job.slug.clone(),
        target: job.target.clone(),
        title,
        display_date: shown_date,
        is_update: job.is_update,
    })
}
