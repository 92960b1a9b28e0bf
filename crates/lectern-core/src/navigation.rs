//! Click classification for the viewer page.
//!
//! Every click is classified exactly once by [`route_click`], so a resource
//! link nested inside a card is handled as that link and the card never sees
//! the same click.

use crate::config::{Labels, Selectors};
use crate::present::KIND_RECORDING;
use crate::ui::UiTree;

/// What a click on the page should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickRoute<N> {
    /// Select this lecture item.
    Lecture(N),
    /// Load this resource link (enabled or not) in the viewer.
    Resource(N),
    /// A click elsewhere inside a card, proxied to the card's first enabled link.
    Card { card: N, link: Option<N> },
    /// Not ours; default browser handling applies.
    PassThrough,
}

/// Classify a click by the nearest meaningful ancestor of `target`.
///
/// Precedence: resource link, then card, then lecture item inside the lecture
/// list. A plain anchor inside a card keeps its own navigation.
pub fn route_click<T: UiTree>(tree: &T, selectors: &Selectors, target: &T::Node) -> ClickRoute<T::Node> {
    let resource = selectors.any_resource();

    if let Some(link) = tree.closest(target, &resource) {
        return ClickRoute::Resource(link);
    }

    if let Some(card) = tree.closest(target, &selectors.card) {
        let in_own_anchor = tree
            .closest(target, "a")
            .is_some_and(|anchor| tree.closest(&anchor, &selectors.card).as_ref() == Some(&card));
        if in_own_anchor {
            return ClickRoute::PassThrough;
        }
        let link = tree
            .find_all_within(&card, &resource)
            .into_iter()
            .find(|link| crate::present::is_enabled(tree, link));
        return ClickRoute::Card { card, link };
    }

    if let Some(item) = tree.closest(target, &selectors.lecture_item) {
        if tree.closest(&item, &selectors.lecture_list).is_some() {
            return ClickRoute::Lecture(item);
        }
    }

    ClickRoute::PassThrough
}

/// Kind of resource a link opens, for the viewer title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Slides,
    /// A recording, with its visible label.
    Recording(String),
}

impl ResourceKind {
    /// Classify a resource link.
    ///
    /// The slide link and links marked `data-kind="slides"` are slides;
    /// everything else is treated as a recording.
    pub fn of<T: UiTree>(tree: &T, selectors: &Selectors, link: &T::Node) -> Self {
        let is_slide_link = tree.closest(link, &selectors.slide_link).as_ref() == Some(link);
        let kind = tree.attr(link, "data-kind");
        if is_slide_link || kind.as_deref() == Some("slides") {
            return Self::Slides;
        }
        let label = match kind.as_deref() {
            Some(KIND_RECORDING) | None => tree.text(link),
            Some(_) => tree.attr(link, "data-label").unwrap_or_else(|| tree.text(link)),
        };
        Self::Recording(label.trim().to_string())
    }

    /// Suffix shown after the lecture title.
    pub fn label(&self, labels: &Labels) -> String {
        match self {
            Self::Slides => labels.slides.clone(),
            Self::Recording(label) if !label.is_empty() => label.clone(),
            Self::Recording(_) => labels.recording.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::ui::{MemoryTree, NodeId};

    struct Page {
        tree: MemoryTree,
        item_title: NodeId,
        item: NodeId,
        stray_item: NodeId,
        slide_link: NodeId,
        card_body: NodeId,
        card: NodeId,
        card_link: NodeId,
        plain_anchor: NodeId,
        empty_card_body: NodeId,
    }

    fn page() -> Page {
        let tree = MemoryTree::new();
        let root = tree.root();
        let list = tree.add(root, "ul", &[("id", "lecture-list")]);
        let item = tree.add(list, "li", &[("class", "lecture-item")]);
        let item_title = tree.add_with_text(item, "span", &[("class", "lecture-title")], "Intro");
        let stray_item = tree.add(root, "li", &[("class", "lecture-item")]);

        let slide_link = tree.add_with_text(root, "a", &[("id", "slides-link"), ("href", "#")], "Slides");

        let card = tree.add(root, "div", &[("class", "resource-card")]);
        let card_body = tree.add_with_text(card, "p", &[], "Watch part 1");
        let card_link = tree.add_with_text(
            card,
            "a",
            &[("class", "resource-link"), ("href", "https://x/embed/1"), ("data-kind", "recording")],
            "Part 1",
        );
        let plain_anchor = tree.add_with_text(card, "a", &[("href", "notes.html")], "Notes");

        let empty_card = tree.add(root, "div", &[("class", "resource-card")]);
        let empty_card_body = tree.add_with_text(empty_card, "p", &[], "Nothing yet");
        tree.add_with_text(
            empty_card,
            "a",
            &[("class", "resource-link disabled"), ("href", "#")],
            "No recording posted",
        );

        Page {
            tree,
            item_title,
            item,
            stray_item,
            slide_link,
            card_body,
            card,
            card_link,
            plain_anchor,
            empty_card_body,
        }
    }

    #[test]
    fn test_route_lecture() {
        let p = page();
        let sel = SiteConfig::default().selectors;
        assert_eq!(route_click(&p.tree, &sel, &p.item_title), ClickRoute::Lecture(p.item));
    }

    #[test]
    fn test_route_lecture_outside_list_ignored() {
        let p = page();
        let sel = SiteConfig::default().selectors;
        assert_eq!(route_click(&p.tree, &sel, &p.stray_item), ClickRoute::PassThrough);
    }

    #[test]
    fn test_route_resource_links() {
        let p = page();
        let sel = SiteConfig::default().selectors;
        assert_eq!(route_click(&p.tree, &sel, &p.slide_link), ClickRoute::Resource(p.slide_link));
        assert_eq!(route_click(&p.tree, &sel, &p.card_link), ClickRoute::Resource(p.card_link));
    }

    #[test]
    fn test_route_card_proxies_first_enabled_link() {
        let p = page();
        let sel = SiteConfig::default().selectors;
        assert_eq!(
            route_click(&p.tree, &sel, &p.card_body),
            ClickRoute::Card {
                card: p.card,
                link: Some(p.card_link)
            }
        );
    }

    #[test]
    fn test_route_card_without_enabled_link() {
        let p = page();
        let sel = SiteConfig::default().selectors;
        assert!(matches!(
            route_click(&p.tree, &sel, &p.empty_card_body),
            ClickRoute::Card { link: None, .. }
        ));
    }

    #[test]
    fn test_route_plain_anchor_in_card_passes_through() {
        let p = page();
        let sel = SiteConfig::default().selectors;
        assert_eq!(route_click(&p.tree, &sel, &p.plain_anchor), ClickRoute::PassThrough);
    }

    #[test]
    fn test_resource_kind() {
        let p = page();
        let config = SiteConfig::default();
        let slides = ResourceKind::of(&p.tree, &config.selectors, &p.slide_link);
        assert_eq!(slides, ResourceKind::Slides);
        assert_eq!(slides.label(&config.labels), "Slides");

        let rec = ResourceKind::of(&p.tree, &config.selectors, &p.card_link);
        assert_eq!(rec, ResourceKind::Recording("Part 1".into()));
        assert_eq!(rec.label(&config.labels), "Part 1");
        assert_eq!(ResourceKind::Recording(String::new()).label(&config.labels), "Recording");
    }
}
