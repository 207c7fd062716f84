//! Named-slot mutation of hand-authored HTML documents.
//!
//! The page template and the site index are authored by hand and only
//! *spliced into*, never regenerated: the template carries elements with
//! classes `post-title`, `post-date` and `post-content` plus a `<title>`
//! element, and the index carries an element with class `post-list`. Those
//! class names are treated as slot names — the build never inspects any
//! other part of the documents, so authors can restructure everything
//! around the slots freely.
//!
//! # Document contract
//!
//! Slot lookup is a token scan, not a full HTML parse. It expects the
//! well-formed, hand-authored markup these files actually are:
//!
//! - attribute values are quoted, and `>` does not appear inside them
//! - slot elements are closed with a matching end tag (not void elements)
//!
//! Nesting of same-named tags between a slot's opening and closing tag is
//! handled, so `.post-content` may be a `<div>` containing other `<div>`s.
//!
//! A document missing a requested slot fails with
//! [`TemplateError::MissingSlot`]; that aborts the whole run, since a
//! template that lost one of its slots would otherwise produce pages with
//! content silently dropped.

use pulldown_cmark_escape::escape_html;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no element with class \"{0}\"")]
    MissingSlot(String),
    #[error("no <title> element")]
    MissingTitle,
}

/// An HTML document with named insertion points.
#[derive(Debug, Clone)]
pub struct SlotDocument {
    html: String,
}

/// Byte offsets of a located element's content, `open_end..content_end`.
struct ElementSpan {
    open_end: usize,
    content_end: usize,
}

impl SlotDocument {
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        Ok(Self {
            html: fs::read_to_string(path)?,
        })
    }

    pub fn from_string(html: String) -> Self {
        Self { html }
    }

    pub fn save(&self, path: &Path) -> Result<(), TemplateError> {
        fs::write(path, &self.html)?;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Replace the `<title>` element's text. The text is escaped.
    pub fn set_title(&mut self, text: &str) -> Result<(), TemplateError> {
        let span = self
            .find_element(|tag| tag_name(tag) == "title")
            .ok_or(TemplateError::MissingTitle)?;
        self.html
            .replace_range(span.open_end..span.content_end, &escaped(text));
        Ok(())
    }

    /// Replace the inner content of the slot element with escaped text.
    pub fn fill_text(&mut self, slot: &str, text: &str) -> Result<(), TemplateError> {
        self.fill(slot, &escaped(text))
    }

    /// Replace the inner content of the slot element with raw markup.
    pub fn fill(&mut self, slot: &str, html: &str) -> Result<(), TemplateError> {
        let span = self.find_slot(slot)?;
        self.html.replace_range(span.open_end..span.content_end, html);
        Ok(())
    }

    /// Splice raw markup immediately after the slot element's opening tag,
    /// above whatever content it already holds.
    pub fn insert_at_head(&mut self, slot: &str, html: &str) -> Result<(), TemplateError> {
        let span = self.find_slot(slot)?;
        self.html.insert_str(span.open_end, html);
        Ok(())
    }

    fn find_slot(&self, class: &str) -> Result<ElementSpan, TemplateError> {
        self.find_element(|tag| has_class(tag, class))
            .ok_or_else(|| TemplateError::MissingSlot(class.to_string()))
    }

    /// Scan for the first opening tag accepted by `matches` and locate the
    /// span of the element's inner content.
    fn find_element(&self, matches: impl Fn(&str) -> bool) -> Option<ElementSpan> {
        let mut pos = 0;
        while let Some(rel) = self.html[pos..].find('<') {
            let start = pos + rel;
            pos = start + 1;
            let rest = &self.html[start..];
            let tag_end_rel = rest.find('>')?;
            let tag = &rest[..tag_end_rel + 1];
            if tag.starts_with("</") || tag.starts_with("<!") || tag.starts_with("<?") {
                continue;
            }
            let name = tag_name(tag);
            if name.is_empty() || !matches(tag) {
                continue;
            }
            let open_end = start + tag_end_rel + 1;
            if tag.ends_with("/>") {
                continue; // self-closing, no content to splice
            }
            let content_end = self.find_closing_tag(&name, open_end)?;
            return Some(ElementSpan {
                open_end,
                content_end,
            });
        }
        None
    }

    /// Find the start of the closing tag matching an element opened just
    /// before `from`, counting nested same-named elements.
    fn find_closing_tag(&self, name: &str, from: usize) -> Option<usize> {
        let open_pat = format!("<{name}");
        let close_pat = format!("</{name}");
        let mut depth = 1usize;
        let mut pos = from;
        loop {
            let close_rel = find_tag_token(&self.html[pos..], &close_pat)?;
            match find_tag_token(&self.html[pos..], &open_pat) {
                Some(open_rel) if open_rel < close_rel => {
                    let tag_end = pos + open_rel + self.html[pos + open_rel..].find('>')?;
                    if !self.html[..tag_end].ends_with('/') {
                        depth += 1;
                    }
                    pos = tag_end + 1;
                }
                _ => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(pos + close_rel);
                    }
                    pos = pos + close_rel + close_pat.len();
                }
            }
        }
    }
}

/// Escape text for splicing into element content or attribute values.
fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // writing into a String is infallible
    let _ = escape_html(&mut out, text);
    out
}

/// Tag name of an opening tag like `<div class="x">` → `div`.
fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Whether an opening tag's `class` attribute contains `class` as a
/// whitespace-separated token.
fn has_class(tag: &str, class: &str) -> bool {
    let Some(attr_pos) = find_class_attr(tag) else {
        return false;
    };
    let value_start = attr_pos + "class=".len();
    let mut chars = tag[value_start..].chars();
    let Some(quote) = chars.next().filter(|c| *c == '"' || *c == '\'') else {
        return false;
    };
    let value: String = chars.take_while(|c| *c != quote).collect();
    value.split_whitespace().any(|token| token == class)
}

/// Position of a `class=` attribute preceded by whitespace.
fn find_class_attr(tag: &str) -> Option<usize> {
    let mut pos = 0;
    while let Some(rel) = tag[pos..].find("class=") {
        let at = pos + rel;
        if tag[..at].ends_with(|c: char| c.is_ascii_whitespace()) {
            return Some(at);
        }
        pos = at + "class=".len();
    }
    None
}

/// Find `pat` in `haystack` where the following character ends the tag
/// name, so `<li` does not match `<link`.
fn find_tag_token(haystack: &str, pat: &str) -> Option<usize> {
    let mut pos = 0;
    while let Some(rel) = haystack[pos..].find(pat) {
        let at = pos + rel;
        match haystack.as_bytes().get(at + pat.len()) {
            Some(b'>') | Some(b'/') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')
            | None => return Some(at),
            _ => pos = at + pat.len(),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> SlotDocument {
        SlotDocument::from_string(html.to_string())
    }

    // =========================================================================
    // Slot filling
    // =========================================================================

    #[test]
    fn fill_replaces_inner_content() {
        let mut d = doc(r#"<div class="post-content">placeholder</div>"#);
        d.fill("post-content", "<p>Hi</p>").unwrap();
        assert_eq!(d.as_str(), r#"<div class="post-content"><p>Hi</p></div>"#);
    }

    #[test]
    fn fill_matches_class_token_among_several() {
        let mut d = doc(r#"<h1 class="heading post-title big">old</h1>"#);
        d.fill_text("post-title", "New Title").unwrap();
        assert!(d.as_str().contains(">New Title</h1>"));
    }

    #[test]
    fn fill_does_not_match_class_substring() {
        let mut d = doc(r#"<span class="post-title-wrapper">x</span>"#);
        assert!(matches!(
            d.fill("post-title", "y"),
            Err(TemplateError::MissingSlot(_))
        ));
    }

    #[test]
    fn fill_respects_nested_same_tags() {
        let mut d = doc(
            r#"<div class="post-content"><div>old</div><div>stuff</div></div><div>after</div>"#,
        );
        d.fill("post-content", "new").unwrap();
        assert_eq!(
            d.as_str(),
            r#"<div class="post-content">new</div><div>after</div>"#
        );
    }

    #[test]
    fn fill_text_escapes_markup() {
        let mut d = doc(r#"<h1 class="post-title"></h1>"#);
        d.fill_text("post-title", "Tips & <tricks>").unwrap();
        assert!(d.as_str().contains("Tips &amp; &lt;tricks&gt;"));
    }

    #[test]
    fn fill_first_matching_element_only() {
        let mut d = doc(r#"<p class="post-date">a</p><p class="post-date">b</p>"#);
        d.fill_text("post-date", "Jan 01, 2026").unwrap();
        assert_eq!(
            d.as_str(),
            r#"<p class="post-date">Jan 01, 2026</p><p class="post-date">b</p>"#
        );
    }

    #[test]
    fn missing_slot_is_an_error() {
        let mut d = doc("<div>no slots here</div>");
        let err = d.fill("post-content", "x").unwrap_err();
        assert!(err.to_string().contains("post-content"));
    }

    #[test]
    fn single_quoted_class_attribute() {
        let mut d = doc("<div class='post-content'>old</div>");
        d.fill("post-content", "new").unwrap();
        assert!(d.as_str().contains(">new</div>"));
    }

    // =========================================================================
    // Title element
    // =========================================================================

    #[test]
    fn set_title_replaces_text() {
        let mut d = doc("<head><title>Old</title></head>");
        d.set_title("Hello World - Nicolas Leao").unwrap();
        assert_eq!(
            d.as_str(),
            "<head><title>Hello World - Nicolas Leao</title></head>"
        );
    }

    #[test]
    fn set_title_without_title_element_errors() {
        let mut d = doc("<head></head>");
        assert!(matches!(
            d.set_title("x"),
            Err(TemplateError::MissingTitle)
        ));
    }

    #[test]
    fn set_title_escapes_text() {
        let mut d = doc("<title></title>");
        d.set_title("Q&A").unwrap();
        assert_eq!(d.as_str(), "<title>Q&amp;A</title>");
    }

    // =========================================================================
    // Head insertion
    // =========================================================================

    #[test]
    fn insert_at_head_keeps_existing_content_below() {
        let mut d = doc(r#"<ul class="post-list"><li>old</li></ul>"#);
        d.insert_at_head("post-list", "<li>new</li>").unwrap();
        assert_eq!(
            d.as_str(),
            r#"<ul class="post-list"><li>new</li><li>old</li></ul>"#
        );
    }

    #[test]
    fn insert_at_head_into_empty_list() {
        let mut d = doc(r#"<ul class="post-list"></ul>"#);
        d.insert_at_head("post-list", "<li>first</li>").unwrap();
        assert_eq!(d.as_str(), r#"<ul class="post-list"><li>first</li></ul>"#);
    }

    // =========================================================================
    // Tag scanning details
    // =========================================================================

    #[test]
    fn li_does_not_match_link() {
        // <link> before the list must not be mistaken for a nested <li>
        let mut d = doc(
            r#"<li class="post-list"><link rel="x"><li>a</li></li>"#,
        );
        // the inner <li>a</li> nests and closes before the outer </li>
        d.insert_at_head("post-list", "<li>n</li>").unwrap();
        assert!(d.as_str().starts_with(r#"<li class="post-list"><li>n</li>"#));
    }

    #[test]
    fn comments_and_doctype_are_skipped() {
        let mut d = doc(
            "<!DOCTYPE html><!-- class=\"post-date\" --><p class=\"post-date\">x</p>",
        );
        d.fill_text("post-date", "y").unwrap();
        assert!(d.as_str().ends_with(r#"<p class="post-date">y</p>"#));
    }
}
