//! Off-page rendering of what the viewer shows for one lecture.

use lectern_core::present;
use lectern_core::ui::{MemoryTree, NodeId, UiTree};
use lectern_core::{LectureKey, LectureViewer, MediaDirectory, SiteConfig};

/// One resource link as the viewer would render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLink {
    pub label: String,
    /// `None` when the link is disabled.
    pub href: Option<String>,
}

/// The resource area of the viewer for a single lecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub key: LectureKey,
    pub slides: PreviewLink,
    /// Empty when the placeholder text is shown instead.
    pub recordings: Vec<PreviewLink>,
    /// Text of the recordings area (placeholder or joined labels).
    pub recordings_text: String,
    pub html: String,
}

/// Run the real viewer against a minimal page containing only `src`.
///
/// Selectors always come from the built-in defaults since the page skeleton
/// is built here; labels come from `config`.
pub fn render(config: &SiteConfig, src: &str, media: MediaDirectory) -> Preview {
    let mut config = config.clone();
    config.selectors = SiteConfig::default().selectors;

    let tree = MemoryTree::new();
    let root = tree.root();
    let list = tree.add(root, "ul", &[("id", "lecture-list")]);
    tree.add(list, "li", &[("class", "lecture-item"), ("data-src", src)]);
    let slide = tree.add(root, "a", &[("id", "slides-link"), ("class", "resource-link")]);
    let recordings = tree.add(root, "div", &[("id", "recording-links")]);

    let mut viewer = LectureViewer::new(tree, config);
    viewer.init();
    viewer.apply_media_directory(media);

    let tree = viewer.tree();
    let link = |node: NodeId| PreviewLink {
        label: tree.text(&node),
        href: present::is_enabled(tree, &node)
            .then(|| tree.attr(&node, "href"))
            .flatten(),
    };

    Preview {
        key: viewer
            .active_lecture()
            .map(|info| info.key.clone())
            .unwrap_or_default(),
        slides: link(slide),
        recordings: tree.find_all_within(&recordings, "a").into_iter().map(link).collect(),
        recordings_text: tree.text(&recordings),
        html: format!("{}\n{}", tree.outer_html(slide), tree.outer_html(recordings)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_without_media() {
        let preview = render(&SiteConfig::default(), "lectures/lec03.html", MediaDirectory::new());
        assert_eq!(preview.key.as_str(), "lec03");
        assert_eq!(
            preview.slides,
            PreviewLink {
                label: "No slides posted".into(),
                href: None
            }
        );
        assert!(preview.recordings.is_empty());
        assert_eq!(preview.recordings_text, "No recording posted");
    }

    #[test]
    fn test_preview_with_media() {
        let media = MediaDirectory::from_json(
            r#"{"lec03": {"slide": "https://s.example.edu/lec03.pdf",
                          "recordings": [{"url": "https://youtu.be/abc123", "label": "Part 1"},
                                         {"url": "https://www.youtube.com/watch?v=def456"}]}}"#,
        )
        .unwrap();
        let preview = render(&SiteConfig::default(), "lectures/lec03.html", media);
        assert_eq!(preview.slides.href.as_deref(), Some("https://s.example.edu/lec03.pdf"));
        assert_eq!(
            preview.recordings,
            vec![
                PreviewLink {
                    label: "Part 1".into(),
                    href: Some("https://www.youtube.com/embed/abc123?rel=0".into())
                },
                PreviewLink {
                    label: "Recording 2".into(),
                    href: Some("https://www.youtube.com/embed/def456?rel=0".into())
                },
            ]
        );
        assert!(preview.html.contains("data-kind=\"recording\""));
    }

    #[test]
    fn test_preview_html_escapes_labels() {
        let media = MediaDirectory::from_json(
            r#"{"lec03": {"recordings": [{"url": "https://media.example.edu/a.mp4", "label": "Q&A <live>"}]}}"#,
        )
        .unwrap();
        let preview = render(&SiteConfig::default(), "lectures/lec03.html", media);
        assert_eq!(preview.recordings[0].label, "Q&A <live>");
        assert!(preview.html.contains(">Q&amp;A &lt;live&gt;</a>"));
    }

    #[test]
    fn test_preview_uses_configured_labels() {
        let mut config = SiteConfig::default();
        config.labels.no_slides = "Slides coming soon".into();
        config.selectors.slide_link = "#elsewhere".into();
        let preview = render(&config, "lectures/lec09.html", MediaDirectory::new());
        assert_eq!(preview.slides.label, "Slides coming soon");
    }
}
