//! Media directory loading for the CLI: local files or http(s) URLs.

use std::path::PathBuf;

use lectern_core::media::MediaFetcher;
use lectern_core::LecternError;
use reqwest::Client;

/// Where a media directory document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Url(String),
    File(PathBuf),
}

impl MediaSource {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

/// [`MediaFetcher`] that reads files from disk and fetches URLs with `reqwest`.
pub struct CliFetcher {
    http: Client,
}

impl Default for CliFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CliFetcher {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<String, LecternError> {
        tracing::debug!(url, "Fetching media directory");
        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LecternError::Fetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Media directory request failed");
            return Err(LecternError::Status {
                status: status.as_u16(),
                path: url.to_string(),
            });
        }

        resp.text()
            .await
            .map_err(|e| LecternError::Fetch(e.to_string()))
    }
}

impl MediaFetcher for CliFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, LecternError> {
        match MediaSource::parse(path) {
            MediaSource::Url(url) => self.fetch_url(&url).await,
            MediaSource::File(file) => {
                tracing::debug!(path = %file.display(), "Reading media directory");
                Ok(tokio::fs::read_to_string(&file).await?)
            }
        }
    }
}
