//! Site index updating.
//!
//! Appends entries for newly created pages to the head of the index
//! page's `.post-list` element, so the batch lands above every prior
//! entry with its own order preserved. Entries are only ever *added* —
//! re-rendered posts already have one, and nothing here deletes or
//! reorders existing entries, so a rebuild can never lose posts from the
//! index.
//!
//! Each entry mirrors the hand-authored markup around it:
//!
//! ```html
//! <li class="post-item">
//!   <a href="posts/hello-world.html" class="post-title" target="_blank">Hello World</a>
//!   <span class="post-date">Mar 14, 2026</span>
//! </li>
//! ```

use crate::markdown::{escape_text, escape_url};
use crate::render::RenderedPage;
use crate::template::{SlotDocument, TemplateError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Prepend entries for `new_pages` to the index's post list. No-op for an
/// empty batch — the index file is not even read. Returns the number of
/// entries added.
pub fn update(index_path: &Path, new_pages: &[RenderedPage]) -> Result<usize, IndexError> {
    if new_pages.is_empty() {
        return Ok(0);
    }

    let index_dir = index_path.parent().unwrap_or_else(|| Path::new(""));
    let mut doc = SlotDocument::load(index_path)?;

    let mut items = String::new();
    for page in new_pages {
        items.push_str(&format_entry(page, index_dir));
    }
    doc.insert_at_head("post-list", &items)?;
    doc.save(index_path)?;

    Ok(new_pages.len())
}

fn format_entry(page: &RenderedPage, index_dir: &Path) -> String {
    format!(
        "\n<li class=\"post-item\"><a href=\"{}\" class=\"post-title\" target=\"_blank\">{}</a><span class=\"post-date\">{}</span></li>",
        escape_url(&relative_href(&page.target, index_dir)),
        escape_text(&page.title),
        escape_text(&page.display_date),
    )
}

/// Href from the index's directory to a generated page, with `/`
/// separators regardless of platform.
fn relative_href(target: &Path, index_dir: &Path) -> String {
    let relative = target.strip_prefix(index_dir).unwrap_or(target);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
