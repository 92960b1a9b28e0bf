use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::announcements::Announcement;
use crate::error::LecternError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub media: MediaConfig,
    pub labels: Labels,
    pub selectors: Selectors,
    pub announcements: AnnouncementsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Relative path of the media directory JSON document.
    pub path: String,
}

/// Visible strings the viewer writes into the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Labels {
    pub no_slides: String,
    pub no_recording: String,
    pub default_title: String,
    pub slides: String,
    pub recording: String,
    pub separator: String,
    pub no_announcements: String,
}

/// CSS selectors for every element the viewer reads or mutates.
///
/// Only simple selectors (`tag`, `.class`, `#id`, compounds of those, and
/// comma-separated lists) are guaranteed to work with every tree backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selectors {
    pub lecture_list: String,
    pub lecture_item: String,
    pub lecture_title: String,
    pub lecture_meta: String,
    pub frame: String,
    pub title: String,
    pub meta: String,
    pub open_link: String,
    pub slide_link: String,
    pub recordings: String,
    pub resource_link: String,
    pub card: String,
    pub announcements: String,
    pub year: String,
}

impl Selectors {
    /// Selector matching anything clickable as a resource: generated recording
    /// links and the slide link.
    pub fn any_resource(&self) -> String {
        format!("{}, {}", self.resource_link, self.slide_link)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementsConfig {
    pub limit: usize,
    #[serde(default)]
    pub items: Vec<Announcement>,
}

impl SiteConfig {
    /// Parse a full configuration document.
    pub fn from_toml(content: &str) -> Result<Self, LecternError> {
        toml::from_str(content).map_err(|e| LecternError::Config(e.to_string()))
    }

    /// Load config from `path` if it exists, otherwise the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, LecternError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            tracing::debug!(path = %path.display(), "Loading site config");
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml(&self) -> Result<String, LecternError> {
        toml::to_string_pretty(self).map_err(|e| LecternError::Config(e.to_string()))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = SiteConfig::default();
        assert_eq!(config.media.path, "assets/lecture_media.json");
        assert_eq!(config.labels.no_slides, "No slides posted");
        assert_eq!(config.labels.no_recording, "No recording posted");
        assert_eq!(config.announcements.limit, 5);
        assert_eq!(config.announcements.items.len(), 2);
    }

    #[test]
    fn test_roundtrip() {
        let config = SiteConfig::default();
        let serialized = config.to_toml().unwrap();
        let deserialized = SiteConfig::from_toml(&serialized).unwrap();
        assert_eq!(deserialized.selectors.frame, config.selectors.frame);
        assert_eq!(deserialized.labels.separator, config.labels.separator);
    }

    #[test]
    fn test_any_resource_selector() {
        let config = SiteConfig::default();
        assert_eq!(
            config.selectors.any_resource(),
            ".resource-link, #slides-link"
        );
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.labels.default_title, "Lecture");
    }

    #[test]
    fn test_load_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        let mut config = SiteConfig::default();
        config.media.path = "data/media.json".into();
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = SiteConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.media.path, "data/media.json");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "[media]\npath = 3\n").unwrap();
        assert!(matches!(
            SiteConfig::load_or_default(&path),
            Err(LecternError::Config(_))
        ));
    }
}
