//! CLI output formatting.
//!
//! Output is information-centric: the primary display for every post is
//! its title and positional index, with the generated file path as
//! trailing context. Each command has a `format_*` function returning
//! `Vec<String>` (pure, testable) and a `print_*` wrapper that writes to
//! stdout.
//!
//! ## Build
//!
//! ```text
//! Posts
//! 001 Hello World → posts/hello-world.html (new)
//! 002 Older Post → posts/older-post.html (refreshed)
//!
//! 1 new, 1 refreshed (2 total), 1 index entry added
//! ```
//!
//! ## Regenerate
//!
//! ```text
//! Posts
//! 001 Hello World → posts/hello-world.html (refreshed)
//!
//! Regenerated 1 post
//! ```

use crate::commands::BuildReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Target path for display: relative to the site root, `/` separators.
fn display_target(target: &Path, root: &Path) -> String {
    let relative = target.strip_prefix(root).unwrap_or(target);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn format_build_output(report: &BuildReport, root: &Path) -> Vec<String> {
    if report.pages.is_empty() {
        return vec!["No new or stale posts to convert".to_string()];
    }

    let mut lines = vec!["Posts".to_string()];
    for (pos, page) in report.pages.iter().enumerate() {
        let marker = if page.is_update { "refreshed" } else { "new" };
        lines.push(format!(
            "{} {} → {} ({})",
            format_index(pos + 1),
            page.title,
            display_target(&page.target, root),
            marker
        ));
    }
    lines.push(String::new());

    let new_count = report.pages.iter().filter(|p| !p.is_update).count();
    let refreshed = report.pages.len() - new_count;
    let index_note = match report.index_added {
        0 => String::new(),
        1 => ", 1 index entry added".to_string(),
        n => format!(", {n} index entries added"),
    };
    lines.push(format!(
        "{} new, {} refreshed ({} total){}",
        new_count,
        refreshed,
        report.pages.len(),
        index_note
    ));
    lines
}

pub fn format_regenerate_output(report: &BuildReport, root: &Path) -> Vec<String> {
    if report.pages.is_empty() {
        return vec!["No posts to regenerate".to_string()];
    }

    let mut lines = vec!["Posts".to_string()];
    for (pos, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {} (refreshed)",
            format_index(pos + 1),
            page.title,
            display_target(&page.target, root),
        ));
    }
    lines.push(String::new());
    lines.push(format!("Regenerated {}", plural(report.pages.len(), "post")));
    lines
}

pub fn format_version_output(changed: bool, version: &str) -> Vec<String> {
    if changed {
        vec![
            format!("Version set to {version}"),
            "Run `simple-press build` to refresh stale posts".to_string(),
        ]
    } else {
        vec![format!("Version already {version}")]
    }
}

pub fn print_build_output(report: &BuildReport, root: &Path) {
    for line in format_build_output(report, root) {
        println!("{line}");
    }
}

pub fn print_regenerate_output(report: &BuildReport, root: &Path) {
    for line in format_regenerate_output(report, root) {
        println!("{line}");
    }
}

pub fn print_version_output(changed: bool, version: &str) {
    for line in format_version_output(changed, version) {
        println!("{line}");
    }
}
