//! Recording URL normalization for inline embedding.
//!
//! YouTube watch pages and short links refuse to render inside an iframe, so
//! they are rewritten to the player endpoint. Anything else is passed through
//! untouched on the assumption it is already embeddable (a direct file, a
//! different provider's player URL).

use url::Url;

/// Player endpoint; `rel=0` limits end-screen suggestions to the same channel.
const EMBED_BASE: &str = "https://www.youtube.com/embed/";
const EMBED_PARAMS: &str = "rel=0";

/// Which YouTube URL shape a host belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VideoHost {
    /// `youtu.be/<id>`
    ShortLink,
    /// `youtube.com/watch?v=<id>`
    Standard,
}

impl VideoHost {
    fn classify(host: &str) -> Option<Self> {
        if host_matches(host, "youtu.be") {
            Some(Self::ShortLink)
        } else if host_matches(host, "youtube.com") {
            Some(Self::Standard)
        } else {
            None
        }
    }
}

/// Whether `host` is `domain` or one of its subdomains.
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Build the canonical embed URL for a video id.
pub fn embed_url_for(video_id: &str) -> String {
    format!("{EMBED_BASE}{video_id}?{EMBED_PARAMS}")
}

/// Extract the YouTube video id from a short link or watch URL.
///
/// Returns `None` for unparseable input, non-YouTube hosts, and YouTube URLs
/// that carry no id (channel pages, `/watch` without `v`).
pub fn video_id(input: &str) -> Option<String> {
    let parsed = Url::parse(input).ok()?;
    let host = VideoHost::classify(parsed.host_str()?)?;

    let id = match host {
        VideoHost::ShortLink => parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        VideoHost::Standard => parsed
            .query_pairs()
            .find(|(name, _)| name == "v")
            .map(|(_, value)| value.into_owned()),
    }?;

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Whether the URL points at a YouTube host, regardless of whether an id is present.
pub fn is_youtube_url(input: &str) -> bool {
    Url::parse(input)
        .ok()
        .and_then(|u| u.host_str().and_then(VideoHost::classify))
        .is_some()
}

/// Convert a recording URL into one suitable for an iframe `src`.
///
/// Empty input yields an empty string. Unparseable input, non-YouTube URLs and
/// YouTube URLs without a video id are returned unchanged.
pub fn to_embed_url(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    match video_id(input) {
        Some(id) => embed_url_for(&id),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(to_embed_url(""), "");
    }

    #[test]
    fn test_short_link() {
        assert_eq!(
            to_embed_url("https://youtu.be/abc123"),
            "https://www.youtube.com/embed/abc123?rel=0"
        );
    }

    #[test]
    fn test_short_link_with_timestamp() {
        assert_eq!(
            to_embed_url("https://youtu.be/dQw4w9WgXcQ?t=42"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0"
        );
    }

    #[test]
    fn test_short_link_without_id() {
        assert_eq!(to_embed_url("https://youtu.be/"), "https://youtu.be/");
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            to_embed_url("https://www.youtube.com/watch?v=xyz789&list=PL1"),
            "https://www.youtube.com/embed/xyz789?rel=0"
        );
    }

    #[test]
    fn test_mobile_and_bare_hosts() {
        assert_eq!(
            to_embed_url("https://m.youtube.com/watch?v=id1"),
            "https://www.youtube.com/embed/id1?rel=0"
        );
        assert_eq!(
            to_embed_url("https://youtube.com/watch?v=id2"),
            "https://www.youtube.com/embed/id2?rel=0"
        );
    }

    #[test]
    fn test_watch_url_without_v() {
        let input = "https://www.youtube.com/channel/UC123";
        assert_eq!(to_embed_url(input), input);
    }

    #[test]
    fn test_already_embedded_passthrough() {
        let input = "https://www.youtube.com/embed/abc123?rel=0";
        assert_eq!(to_embed_url(input), input);
    }

    #[test]
    fn test_malformed_passthrough() {
        for input in ["not a url", "youtu.be/abc123", "http://", "::::"] {
            assert_eq!(to_embed_url(input), input);
        }
    }

    #[test]
    fn test_other_provider_passthrough() {
        let input = "https://media.example.edu/lec03.mp4";
        assert_eq!(to_embed_url(input), input);
    }

    #[test]
    fn test_lookalike_host_not_matched() {
        let input = "https://notyoutube.com/watch?v=abc";
        assert_eq!(to_embed_url(input), input);
        assert!(!is_youtube_url(input));
    }

    #[test]
    fn test_video_id() {
        assert_eq!(video_id("https://youtu.be/abc123").as_deref(), Some("abc123"));
        assert_eq!(video_id("https://www.youtube.com/watch").as_deref(), None);
        assert!(is_youtube_url("https://www.youtube.com/watch"));
    }
}
