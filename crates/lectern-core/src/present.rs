//! Rendering of resource links into the page.

use crate::config::Labels;
use crate::media::Recording;
use crate::ui::UiTree;

/// `href` given to disabled links; clicking it never leaves the page.
pub const PLACEHOLDER_HREF: &str = "#";

/// Class marking a resource link as unavailable.
pub const DISABLED_CLASS: &str = "disabled";

/// Class carried by every clickable resource link.
pub const RESOURCE_LINK_CLASS: &str = "resource-link";

/// `data-kind` value on generated recording links.
pub const KIND_RECORDING: &str = "recording";

/// Show `node` as an enabled link to `href`, or as a disabled placeholder.
///
/// Applying the same arguments twice leaves the node in the same state.
pub fn present_link<T: UiTree>(tree: &T, node: &T::Node, href: Option<&str>, label: &str) {
    match href {
        Some(href) => {
            tree.set_class(node, DISABLED_CLASS, false);
            tree.remove_attr(node, "aria-disabled");
            tree.set_attr(node, "href", href);
        }
        None => {
            tree.set_class(node, DISABLED_CLASS, true);
            tree.set_attr(node, "aria-disabled", "true");
            tree.set_attr(node, "href", PLACEHOLDER_HREF);
        }
    }
    tree.set_text(node, label);
}

/// Whether a link currently points anywhere.
pub fn is_enabled<T: UiTree>(tree: &T, node: &T::Node) -> bool {
    if tree.has_class(node, DISABLED_CLASS) {
        return false;
    }
    tree.attr(node, "href")
        .is_some_and(|href| !href.is_empty() && href != PLACEHOLDER_HREF)
}

/// Fill `container` with one link per recording, or the "no recording" text.
pub fn render_recordings<T: UiTree>(
    tree: &T,
    container: &T::Node,
    recordings: &[Recording],
    labels: &Labels,
) {
    tree.clear_children(container);

    if recordings.is_empty() {
        tree.set_text(container, &labels.no_recording);
        return;
    }

    for (index, recording) in recordings.iter().enumerate() {
        if index > 0 {
            tree.append_text(container, &labels.separator);
        }
        let Some(link) = tree.append_element(container, "a") else {
            continue;
        };
        tree.set_class(&link, RESOURCE_LINK_CLASS, true);
        tree.set_attr(&link, "data-kind", KIND_RECORDING);
        let url = recording.embed_url();
        let href = (!url.is_empty()).then_some(url.as_str());
        present_link(tree, &link, href, &recording.display_label(index, &labels.recording));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::ui::MemoryTree;

    fn link_tree() -> (MemoryTree, crate::ui::NodeId) {
        let tree = MemoryTree::new();
        let link = tree.add(tree.root(), "a", &[("id", "slides-link"), ("class", "resource-link")]);
        (tree, link)
    }

    #[test]
    fn test_enabled_link() {
        let (tree, link) = link_tree();
        present_link(&tree, &link, Some("slides/lec01.pdf"), "Slides");
        assert_eq!(tree.attr(&link, "href").as_deref(), Some("slides/lec01.pdf"));
        assert_eq!(tree.text(&link), "Slides");
        assert!(is_enabled(&tree, &link));
        assert_eq!(tree.attr(&link, "aria-disabled"), None);
    }

    #[test]
    fn test_disabled_link() {
        let (tree, link) = link_tree();
        present_link(&tree, &link, None, "No slides posted");
        assert_eq!(tree.attr(&link, "href").as_deref(), Some("#"));
        assert_eq!(tree.text(&link), "No slides posted");
        assert!(tree.has_class(&link, "disabled"));
        assert_eq!(tree.attr(&link, "aria-disabled").as_deref(), Some("true"));
        assert!(!is_enabled(&tree, &link));
    }

    #[test]
    fn test_idempotent() {
        for href in [Some("slides/lec01.pdf"), None] {
            let (tree, link) = link_tree();
            present_link(&tree, &link, href, "Label");
            let first = tree.outer_html(link);
            present_link(&tree, &link, href, "Label");
            assert_eq!(tree.outer_html(link), first);
        }
    }

    #[test]
    fn test_reenable_after_disable() {
        let (tree, link) = link_tree();
        present_link(&tree, &link, None, "No slides posted");
        present_link(&tree, &link, Some("s.pdf"), "Slides");
        assert!(is_enabled(&tree, &link));
        assert!(tree.has_class(&link, "resource-link"));
    }

    #[test]
    fn test_render_no_recordings() {
        let labels = SiteConfig::default().labels;
        let tree = MemoryTree::new();
        let container = tree.add(tree.root(), "div", &[("id", "recording-links")]);
        tree.add_with_text(container, "a", &[], "stale");
        render_recordings(&tree, &container, &[], &labels);
        assert_eq!(tree.text(&container), "No recording posted");
        assert!(tree.element_children(container).is_empty());
    }

    #[test]
    fn test_render_recordings() {
        let labels = SiteConfig::default().labels;
        let tree = MemoryTree::new();
        let container = tree.add(tree.root(), "div", &[("id", "recording-links")]);
        let recordings = vec![
            Recording {
                url: "https://youtu.be/abc123".into(),
                label: Some("Part 1".into()),
            },
            Recording {
                url: "https://media.example.edu/lec03b.mp4".into(),
                label: None,
            },
        ];
        render_recordings(&tree, &container, &recordings, &labels);

        let links = tree.element_children(container);
        assert_eq!(links.len(), 2);
        assert_eq!(
            tree.attr(&links[0], "href").as_deref(),
            Some("https://www.youtube.com/embed/abc123?rel=0")
        );
        assert_eq!(tree.text(&links[0]), "Part 1");
        assert_eq!(tree.text(&links[1]), "Recording 2");
        assert_eq!(tree.attr(&links[1], "data-kind").as_deref(), Some("recording"));
        assert_eq!(tree.text(&container), "Part 1 · Recording 2");
    }

    #[test]
    fn test_render_recording_with_blank_url_is_disabled() {
        let labels = SiteConfig::default().labels;
        let tree = MemoryTree::new();
        let container = tree.add(tree.root(), "div", &[]);
        let recordings = vec![Recording {
            url: String::new(),
            label: None,
        }];
        render_recordings(&tree, &container, &recordings, &labels);
        let links = tree.element_children(container);
        assert!(!is_enabled(&tree, &links[0]));
    }
}
