//! # Simple Press
//!
//! A minimal static site builder for markdown blogs. Your filesystem is
//! the data source: markdown documents in `src/` become HTML pages in
//! `posts/`, spliced into a shared hand-authored template, with a small
//! JSON sidecar tracking each post's creation date and template version.
//!
//! # Architecture: One Sequential Pipeline
//!
//! ```text
//! build       src/*.md  →  detect  →  render (per file)  →  posts/*.html
//!                                       ↘ store upsert      ↘ index entries (new posts)
//! version     post-data.json version bump (marks posts stale)
//! regenerate  every source re-rendered, dates preserved, index untouched
//! ```
//!
//! Everything is synchronous and single-process: the tool is a short-lived
//! batch run invoked from a shell, so there is no locking, no partial-
//! failure isolation, and no recovery beyond "missing file means first
//! run". One bad source document aborts the whole run with its error.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `press.toml` loading; layout paths and site identity, all defaulted |
//! | [`store`] | `post-data.json` — global version + per-post records (slug, version, created_at) |
//! | [`detect`] | Classifies sources as new / stale / unchanged, produces render jobs |
//! | [`markdown`] | Title extraction, markdown → HTML, heading ids + `[TOC]`, external-link hardening |
//! | [`template`] | Named-slot splicing into the hand-authored template and index documents |
//! | [`render`] | One source → one populated page; date policy; store upsert side effect |
//! | [`index`] | Prepends entries for newly created pages to the index's post list |
//! | [`commands`] | Orchestration for `build`, `version`, `regenerate` |
//! | [`output`] | CLI progress formatting — pure `format_*` functions + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Slots Over a Template Engine
//!
//! The page template and the index are hand-authored HTML files owned by
//! the site author, not crate assets. Rendering *into* them — rather than
//! regenerating them from a template language — means the author can
//! restyle everything without touching this tool, as long as the slot
//! elements (`post-title`, `post-date`, `post-content`, `post-list`)
//! survive. The [`template`] module treats those class names as named
//! insertion points and leaves every other byte alone.
//!
//! ## Version Strings Over Content Hashes
//!
//! Staleness is driven by a single manually-bumped global version string
//! recorded per post, not by hashing inputs. The question this tool
//! answers is "was this page rendered against the current template
//! generation?", and a version bump is the author's explicit way of
//! saying "re-render everything" — cheap to reason about, and `--force`
//! covers the rest.
//!
//! ## Dates Live in the Store, Not in Pages
//!
//! A post's publication date is captured in `post-data.json` the first
//! time its slug is rendered and re-used for every later render, so
//! template refreshes never silently republish old posts. Generated pages
//! are write-only artifacts; nothing ever parses one back.

pub mod commands;
pub mod config;
pub mod detect;
pub mod index;
pub mod markdown;
pub mod output;
pub mod render;
pub mod store;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
