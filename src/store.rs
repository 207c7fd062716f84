//! Per-post metadata store.
//!
//! The store is a single JSON file (`post-data.json` by default) holding a
//! global version string and one record per published post:
//!
//! ```json
//! {
//!   "version": "1.1.0",
//!   "posts": [
//!     {"slug": "hello-world", "version": "1.1.0", "created_at": "2026-03-14"}
//!   ]
//! }
//! ```
//!
//! The global version marks which template/style generation every post
//! should be rendered against. Bumping it (via `simple-press version`)
//! makes every post whose recorded version lags behind show up as stale on
//! the next build. A post's `created_at` is fixed the first time its slug
//! is rendered; later re-renders keep it, so a template refresh never
//! changes a post's visible publication date.
//!
//! # State handling
//!
//! The store is explicit state: callers load it, mutate it in memory while
//! a batch runs, and save it once at the end. There is no ambient
//! singleton and no concurrent-writer protection — one build process at a
//! time is assumed. A missing file means first run and defaults; malformed
//! JSON aborts the run rather than silently starting over, because the
//! file records dates that cannot be reconstructed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Global version a fresh store starts at.
pub const DEFAULT_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One post's metadata. `slug` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub slug: String,
    /// Global version this post was last rendered against.
    pub version: String,
    /// Date the post was first published. Serialized as `YYYY-MM-DD`.
    pub created_at: NaiveDate,
}

/// The persisted store document: global version + all post records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostData {
    pub version: String,
    pub posts: Vec<PostRecord>,
}

impl Default for PostData {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            posts: Vec::new(),
        }
    }
}

impl PostData {
    /// Load the store. A missing file is first run and yields the default
    /// document; malformed JSON is an error.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist as pretty-printed JSON. Single write, no locking.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Set the global version. Returns false (and leaves the document
    /// untouched) when the version is already `new_version`.
    pub fn bump_version(&mut self, new_version: &str) -> bool {
        if self.version == new_version {
            return false;
        }
        self.version = new_version.to_string();
        true
    }

    /// Look up the record for a slug.
    pub fn record(&self, slug: &str) -> Option<&PostRecord> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Create or refresh the record for a slug.
    ///
    /// An existing record always takes the current global version;
    /// `created_at` moves to `today` only when the render was not an
    /// update. A record created here starts at `today` either way — there
    /// is no earlier date to preserve.
    pub fn upsert(&mut self, slug: &str, today: NaiveDate, is_update: bool) {
        match self.posts.iter_mut().find(|p| p.slug == slug) {
            Some(record) => {
                record.version = self.version.clone();
                if !is_update {
                    record.created_at = today;
                }
            }
            None => self.posts.push(PostRecord {
                slug: slug.to_string(),
                version: self.version.clone(),
                created_at: today,
            }),
        }
    }
}
