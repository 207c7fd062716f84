//! Markdown conversion.
//!
//! Everything between a source document and the HTML that lands in the
//! `.post-content` slot: title extraction, the pulldown-cmark conversion
//! itself, heading ids + `[TOC]` expansion, and external-link hardening.
//!
//! ## Enabled extensions
//!
//! Tables, footnotes, strikethrough and task lists, on top of CommonMark's
//! fenced code blocks. Fence info strings come out as `language-*` classes
//! on the `<code>` element, so highlighting is a stylesheet/script concern
//! of the template, not of the build.
//!
//! ## Heading ids and `[TOC]`
//!
//! Every heading gets a slugified id (`## Going Deeper` → `going-deeper`,
//! duplicates suffixed `-1`, `-2`, …). A paragraph consisting solely of
//! `[TOC]` is replaced with a nested `<ul class="toc">` linking to those
//! ids.
//!
//! ## External links
//!
//! Anchors whose destination starts with `http://` or `https://` gain
//! `target="_blank" rel="noopener noreferrer"`. Relative and fragment
//! links are left untouched. The rewrite happens in the parser event
//! stream, before HTML is ever produced, so no post-hoc DOM surgery is
//! needed.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use pulldown_cmark_escape::{escape_href, escape_html};
use std::collections::HashMap;

/// Maximum title length when falling back to the first line of a document.
const TITLE_FALLBACK_CHARS: usize = 50;

/// Paragraph marker replaced with the generated table of contents.
const TOC_MARKER: &str = "<p>[TOC]</p>";

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Extract a document's title: the first `# ` heading line verbatim, or
/// the first line truncated to 50 characters when no heading exists.
pub fn extract_title(content: &str) -> String {
    if let Some(line) = content.lines().find(|line| line.starts_with("# ")) {
        return line.trim_start_matches("# ").trim().to_string();
    }
    content
        .trim()
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(TITLE_FALLBACK_CHARS)
        .collect()
}

/// A heading collected for id assignment and the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading depth, 1-6.
    pub level: usize,
    /// Plain heading text.
    pub text: String,
    /// Anchor id assigned to the heading.
    pub id: String,
}

/// Convert a markdown document to HTML.
pub fn convert(content: &str) -> String {
    let options = options();
    let headings = collect_headings(content, options);
    let mut next_id = headings.iter().map(|h| CowStr::from(h.id.clone()));
    let mut in_external_link = false;

    let events = Parser::new_ext(content, options).map(|event| match event {
        Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        }) => {
            let id = id.or_else(|| next_id.next());
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            })
        }
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) if is_external(&dest_url) => {
            in_external_link = true;
            Event::InlineHtml(external_anchor(&dest_url, &title).into())
        }
        Event::End(TagEnd::Link) if in_external_link => {
            in_external_link = false;
            Event::InlineHtml("</a>".into())
        }
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, events);

    if out.contains(TOC_MARKER) {
        out = out.replace(TOC_MARKER, &render_toc(&headings));
    }
    out
}

fn is_external(dest: &str) -> bool {
    dest.starts_with("http://") || dest.starts_with("https://")
}

/// Opening tag for a hardened external anchor.
fn external_anchor(dest: &str, title: &str) -> String {
    let mut a = String::from("<a href=\"");
    let _ = escape_href(&mut a, dest);
    if !title.is_empty() {
        a.push_str("\" title=\"");
        let _ = escape_html(&mut a, title);
    }
    a.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
    a
}

/// First parse pass: gather headings in document order and assign ids.
fn collect_headings(content: &str, options: Options) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut current: Option<(HeadingLevel, String)> = None;

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => current = Some((level, String::new())),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let id = unique_id(slugify(&text), &mut seen);
                    entries.push(TocEntry {
                        level: heading_depth(level),
                        text,
                        id,
                    });
                }
            }
            _ => {}
        }
    }
    entries
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Lowercase, keep alphanumerics, collapse everything else to single `-`.
fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// Deduplicate ids across a document: `intro`, `intro-1`, `intro-2`, …
fn unique_id(slug: String, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(slug.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        slug
    } else {
        format!("{}-{}", slug, *count - 1)
    }
}

/// Render the collected headings as a nested `<ul class="toc">`.
fn render_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from("<ul class=\"toc\">");
    if entries.is_empty() {
        out.push_str("</ul>");
        return out;
    }
    let mut level_stack: Vec<usize> = Vec::new();
    for entry in entries {
        match level_stack.last().copied() {
            None => level_stack.push(entry.level),
            Some(current) if entry.level > current => {
                out.push_str("<ul>");
                level_stack.push(entry.level);
            }
            Some(_) => {
                out.push_str("</li>");
                while level_stack.len() > 1 && *level_stack.last().unwrap() > entry.level {
                    level_stack.pop();
                    out.push_str("</ul></li>");
                }
                *level_stack.last_mut().unwrap() = entry.level;
            }
        }
        out.push_str("<li><a href=\"#");
        let _ = escape_href(&mut out, &entry.id);
        out.push_str("\">");
        let _ = escape_html(&mut out, &entry.text);
        out.push_str("</a>");
    }
    out.push_str("</li>");
    while level_stack.len() > 1 {
        level_stack.pop();
        out.push_str("</ul></li>");
    }
    out.push_str("</ul>");
    out
}

/// Escape text for element content or attribute values.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let _ = escape_html(&mut out, text);
    out
}

/// Escape a URL for an href attribute.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let _ = escape_href(&mut out, url);
    out
}
