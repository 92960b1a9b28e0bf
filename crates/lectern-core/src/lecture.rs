use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Final path segment ending in `.html`; capture 1 is the stem.
static RE_LECTURE_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^/]+)\.html$").unwrap());

/// Lookup key for a lecture's media, derived from its page path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LectureKey(String);

impl LectureKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this key could have been produced by [`lecture_key`].
    pub fn is_derivable(&self) -> bool {
        !self.0.is_empty() && lecture_key(&format!("{}.html", self.0)) == *self
    }
}

impl fmt::Display for LectureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LectureKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Derive the lecture key from a content path.
///
/// `"lectures/lec03.html"` yields `lec03`. Paths that don't end in `.html`
/// (exact case) yield an empty key.
pub fn lecture_key(src: &str) -> LectureKey {
    RE_LECTURE_PAGE
        .captures(src)
        .and_then(|caps| caps.get(1))
        .map(|m| LectureKey(m.as_str().to_string()))
        .unwrap_or_default()
}

/// Pick the first candidate with visible content, or `default`.
///
/// Candidates are trimmed; blank strings count as missing. Used for the
/// data attribute → nested text → literal chains on lecture items.
pub fn resolve_fallback<I, S>(candidates: I, default: &str) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.as_ref().trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Display data for the lecture currently loaded in the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureInfo {
    pub src: String,
    pub title: String,
    pub meta: String,
    pub key: LectureKey,
}
