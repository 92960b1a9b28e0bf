//! Per-lecture slides and recordings, loaded once from a JSON document.
//!
//! The document is an object keyed by [`LectureKey`]:
//!
//! ```json
//! { "lec03": { "slide": "https://…", "slide_local": "slides/lec03.pdf",
//!              "recordings": [{ "url": "https://youtu.be/abc123", "label": "Part 1" }] } }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::embed;
use crate::error::LecternError;
use crate::lecture::LectureKey;

/// One recording of a lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Recording {
    /// Visible label, or `"{fallback} {n}"` with a 1-based position.
    pub fn display_label(&self, index: usize, fallback: &str) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("{fallback} {}", index + 1),
        }
    }

    /// Recording URL rewritten for the embedded viewer.
    pub fn embed_url(&self) -> String {
        embed::to_embed_url(&self.url)
    }
}

/// Slides and recordings for one lecture. All fields are optional in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    #[serde(default)]
    pub slide: Option<String>,
    #[serde(default)]
    pub slide_local: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recordings: Vec<Recording>,
}

/// `null` in the document reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

static EMPTY_RECORD: MediaRecord = MediaRecord {
    slide: None,
    slide_local: None,
    recordings: Vec::new(),
};

impl MediaRecord {
    /// Slide href for the viewer: the local copy when present, else the remote URL.
    pub fn slide_href(&self) -> Option<&str> {
        [self.slide_local.as_deref(), self.slide.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.slide_href().is_none() && self.recordings.is_empty()
    }
}

/// Mapping from lecture key to its media.
///
/// Entries that don't have the shape of a [`MediaRecord`] are left out and
/// kept aside as [`SkippedEntry`] so [`lint`](MediaDirectory::lint) can name them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaDirectory {
    records: HashMap<LectureKey, MediaRecord>,
    skipped: Vec<SkippedEntry>,
}

/// A top-level entry that could not be read as a [`MediaRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub key: LectureKey,
    pub reason: String,
}

impl MediaDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a media directory document.
    ///
    /// Only a body that isn't a JSON object is an error. Each entry is read on
    /// its own; one that fails is skipped with a warning and the rest still load.
    pub fn from_json(body: &str) -> Result<Self, LecternError> {
        let entries: Map<String, Value> = serde_json::from_str(body)?;
        let mut directory = Self::new();
        for (key, value) in entries {
            let key = LectureKey::new(key);
            match serde_json::from_value::<MediaRecord>(value) {
                Ok(record) => directory.insert(key, record),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Skipping malformed media entry");
                    directory.skipped.push(SkippedEntry {
                        key,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(directory)
    }

    pub fn insert(&mut self, key: LectureKey, record: MediaRecord) {
        self.records.insert(key, record);
    }

    /// Entries left out by [`from_json`](Self::from_json).
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    /// Media for `key`; an empty record when the key is absent.
    pub fn lookup(&self, key: &LectureKey) -> &MediaRecord {
        self.records.get(key).unwrap_or(&EMPTY_RECORD)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entries sorted by key, for stable reporting.
    pub fn entries(&self) -> Vec<(&LectureKey, &MediaRecord)> {
        let mut entries: Vec<_> = self.records.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Problems that would make a lecture show placeholders or a broken player.
    pub fn lint(&self) -> Vec<MediaIssue> {
        let mut issues: Vec<MediaIssue> = self
            .skipped
            .iter()
            .map(|entry| {
                MediaIssue::new(
                    &entry.key,
                    IssueKind::Malformed {
                        reason: entry.reason.clone(),
                    },
                )
            })
            .collect();
        for (key, record) in self.entries() {
            if !key.is_derivable() {
                issues.push(MediaIssue::new(key, IssueKind::UnreachableKey));
            }
            if record.is_empty() {
                issues.push(MediaIssue::new(key, IssueKind::EmptyRecord));
            }
            for (index, recording) in record.recordings.iter().enumerate() {
                let url = recording.url.trim();
                if url.is_empty() {
                    issues.push(MediaIssue::new(key, IssueKind::EmptyRecordingUrl { index }));
                } else if embed::is_youtube_url(url) && embed::video_id(url).is_none() {
                    issues.push(MediaIssue::new(key, IssueKind::MissingVideoId { index }));
                }
            }
        }
        issues.sort_by(|a, b| a.key.cmp(&b.key));
        issues
    }
}

/// A single finding from [`MediaDirectory::lint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaIssue {
    pub key: LectureKey,
    pub kind: IssueKind,
}

impl MediaIssue {
    fn new(key: &LectureKey, kind: IssueKind) -> Self {
        Self {
            key: key.clone(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Entry is not a media record and was skipped.
    Malformed { reason: String },
    /// No lecture page path can produce this key.
    UnreachableKey,
    /// Neither slides nor recordings.
    EmptyRecord,
    /// Recording at `index` has a blank URL.
    EmptyRecordingUrl { index: usize },
    /// YouTube URL at `index` from which no video id can be extracted.
    MissingVideoId { index: usize },
}

impl fmt::Display for MediaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Malformed { reason } => write!(f, "{}: entry skipped ({reason})", self.key),
            IssueKind::UnreachableKey => {
                write!(f, "{}: key cannot be derived from any lecture page path", self.key)
            }
            IssueKind::EmptyRecord => write!(f, "{}: no slides or recordings", self.key),
            IssueKind::EmptyRecordingUrl { index } => {
                write!(f, "{}: recording {} has an empty url", self.key, index + 1)
            }
            IssueKind::MissingVideoId { index } => {
                write!(f, "{}: recording {} is a YouTube url without a video id", self.key, index + 1)
            }
        }
    }
}

/// Source of the raw media directory document.
///
/// Implementations must return an error for transport failures and for
/// non-success statuses.
pub trait MediaFetcher {
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, LecternError>>;
}

/// Fetch and parse the media directory, propagating every failure.
pub async fn fetch_directory<F: MediaFetcher>(
    fetcher: &F,
    path: &str,
) -> Result<MediaDirectory, LecternError> {
    let body = fetcher.fetch_text(path).await?;
    MediaDirectory::from_json(&body)
}

/// Fetch the media directory, degrading to an empty one on any failure.
pub async fn load_directory<F: MediaFetcher>(fetcher: &F, path: &str) -> MediaDirectory {
    match fetch_directory(fetcher, path).await {
        Ok(directory) => {
            tracing::debug!(path, lectures = directory.len(), "Media directory loaded");
            directory
        }
        Err(e) => {
            tracing::warn!(path, error = %e, "Media directory unavailable, showing placeholders");
            MediaDirectory::new()
        }
    }
}
