//! The lecture viewer: one embedded frame, a lecture list, and the resource
//! links for whichever lecture is active.
//!
//! [`LectureViewer`] is the single owner of all page state. The browser glue
//! feeds it [`ViewerEvent`]s and applies the returned [`EventOutcome`]; it never
//! writes to viewer elements itself.

use crate::config::SiteConfig;
use crate::lecture::{lecture_key, resolve_fallback, LectureInfo};
use crate::media::MediaDirectory;
use crate::navigation::{route_click, ClickRoute, ResourceKind};
use crate::present::{self, present_link, render_recordings};
use crate::ui::UiTree;

/// What is currently loaded in the embedded frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub current_href: String,
    pub current_title: String,
    pub current_meta: String,
}

/// Input to the viewer.
#[derive(Debug)]
pub enum ViewerEvent<N> {
    /// A click anywhere on the page, by its innermost element.
    Click { target: N },
    /// The media directory fetch finished (already degraded to empty on failure).
    MediaSettled(MediaDirectory),
}

/// How the caller should treat the originating browser event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    const HANDLED: Self = Self {
        prevent_default: true,
    };
    const IGNORED: Self = Self {
        prevent_default: false,
    };
}

/// Element lookups resolved once at startup. Any of them may be missing.
#[derive(Debug, Clone)]
struct ViewerElements<N> {
    list: Option<N>,
    frame: Option<N>,
    title: Option<N>,
    meta: Option<N>,
    open_link: Option<N>,
    slide_link: Option<N>,
    recordings: Option<N>,
}

impl<N> ViewerElements<N> {
    fn resolve<T: UiTree<Node = N>>(tree: &T, config: &SiteConfig) -> Self {
        let s = &config.selectors;
        Self {
            list: tree.find(&s.lecture_list),
            frame: tree.find(&s.frame),
            title: tree.find(&s.title),
            meta: tree.find(&s.meta),
            open_link: tree.find(&s.open_link),
            slide_link: tree.find(&s.slide_link),
            recordings: tree.find(&s.recordings),
        }
    }
}

/// Lecture selection controller and viewer navigation.
pub struct LectureViewer<T: UiTree> {
    tree: T,
    config: SiteConfig,
    elements: ViewerElements<T::Node>,
    media: MediaDirectory,
    media_settled: bool,
    state: ViewerState,
    active: Option<(T::Node, LectureInfo)>,
}

impl<T: UiTree> LectureViewer<T> {
    pub fn new(tree: T, config: SiteConfig) -> Self {
        let elements = ViewerElements::resolve(&tree, &config);
        Self {
            tree,
            config,
            elements,
            media: MediaDirectory::new(),
            media_settled: false,
            state: ViewerState::default(),
            active: None,
        }
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn media(&self) -> &MediaDirectory {
        &self.media
    }

    /// Whether the media directory fetch has settled.
    pub fn is_media_settled(&self) -> bool {
        self.media_settled
    }

    pub fn active_lecture(&self) -> Option<&LectureInfo> {
        self.active.as_ref().map(|(_, info)| info)
    }

    /// Whether this page hosts a viewer at all.
    pub fn has_viewer(&self) -> bool {
        self.elements.frame.is_some() || self.elements.list.is_some()
    }

    /// Media directory path: `data-media-path` on the lecture list, else config.
    pub fn media_path(&self) -> String {
        self.elements
            .list
            .as_ref()
            .and_then(|list| self.tree.attr(list, "data-media-path"))
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| self.config.media.path.clone())
    }

    fn lecture_items(&self) -> Vec<T::Node> {
        match &self.elements.list {
            Some(list) => self.tree.find_all_within(list, &self.config.selectors.lecture_item),
            None => Vec::new(),
        }
    }

    /// Select the initially active lecture: the one marked `active` in markup,
    /// else the first. No-op without lecture items.
    pub fn init(&mut self) {
        let items = self.lecture_items();
        let initial = items
            .iter()
            .find(|item| self.tree.has_class(item, "active"))
            .or_else(|| items.first())
            .cloned();
        match initial {
            Some(item) => self.select_lecture(&item),
            None => tracing::debug!("No lecture items on page"),
        }
    }

    /// Read source, title and meta from a lecture item, with fallbacks.
    pub fn lecture_info(&self, item: &T::Node) -> LectureInfo {
        let s = &self.config.selectors;
        let child_text = |selector: &str| {
            self.tree
                .find_within(item, selector)
                .map(|child| self.tree.text(&child))
        };

        let src = resolve_fallback(
            [self.tree.attr(item, "data-src"), self.tree.attr(item, "href")],
            "",
        );
        let title = resolve_fallback(
            [self.tree.attr(item, "data-title"), child_text(&s.lecture_title)],
            &self.config.labels.default_title,
        );
        let meta = resolve_fallback([self.tree.attr(item, "data-meta"), child_text(&s.lecture_meta)], "");
        let key = lecture_key(&src);

        LectureInfo { src, title, meta, key }
    }

    /// Make `item` the only active lecture, load it, and refresh its resource links.
    pub fn select_lecture(&mut self, item: &T::Node) {
        for other in self.lecture_items() {
            self.tree.set_class(&other, "active", false);
        }
        self.tree.set_class(item, "active", true);

        let info = self.lecture_info(item);
        tracing::debug!(src = %info.src, key = %info.key, "Lecture selected");

        self.show(&info.src, &info.title, &info.meta);
        self.active = Some((item.clone(), info));
        self.refresh_media();
    }

    /// Redraw the slide link and recording list for the active lecture from
    /// the current media directory.
    pub fn refresh_media(&self) {
        let Some((_, info)) = &self.active else {
            return;
        };
        let record = self.media.lookup(&info.key);
        let labels = &self.config.labels;

        if let Some(link) = &self.elements.slide_link {
            let href = record.slide_href();
            let label = if href.is_some() {
                &labels.slides
            } else {
                &labels.no_slides
            };
            present_link(&self.tree, link, href, label);
        }
        if let Some(container) = &self.elements.recordings {
            render_recordings(&self.tree, container, &record.recordings, labels);
        }
    }

    /// Install the fetched media directory and refresh the lecture active now.
    pub fn apply_media_directory(&mut self, media: MediaDirectory) {
        self.media = media;
        self.media_settled = true;
        self.refresh_media();
    }

    /// Load an enabled resource link in the frame. Returns whether anything changed.
    pub fn open_resource(&mut self, link: &T::Node) -> bool {
        if !present::is_enabled(&self.tree, link) {
            return false;
        }
        let Some(href) = self.tree.attr(link, "href") else {
            return false;
        };

        let kind = ResourceKind::of(&self.tree, &self.config.selectors, link);
        let (lecture_title, lecture_meta) = match &self.active {
            Some((_, info)) => (info.title.clone(), info.meta.clone()),
            None => (self.config.labels.default_title.clone(), String::new()),
        };
        let title = format!("{lecture_title} - {}", kind.label(&self.config.labels));
        tracing::debug!(%href, %title, "Opening resource in viewer");

        self.show(&href, &title, &lecture_meta);
        true
    }

    pub fn dispatch(&mut self, event: ViewerEvent<T::Node>) -> EventOutcome {
        match event {
            ViewerEvent::Click { target } => self.handle_click(&target),
            ViewerEvent::MediaSettled(media) => {
                self.apply_media_directory(media);
                EventOutcome::IGNORED
            }
        }
    }

    pub fn handle_click(&mut self, target: &T::Node) -> EventOutcome {
        match route_click(&self.tree, &self.config.selectors, target) {
            ClickRoute::Lecture(item) => {
                self.select_lecture(&item);
                EventOutcome::HANDLED
            }
            ClickRoute::Resource(link) => {
                self.open_resource(&link);
                EventOutcome::HANDLED
            }
            ClickRoute::Card { link, .. } => match link {
                Some(link) => {
                    self.open_resource(&link);
                    EventOutcome::HANDLED
                }
                None => EventOutcome::IGNORED,
            },
            ClickRoute::PassThrough => EventOutcome::IGNORED,
        }
    }

    /// Point the frame, the open-in-new-tab link and the heading at a page.
    fn show(&mut self, href: &str, title: &str, meta: &str) {
        let el = &self.elements;
        if let Some(frame) = &el.frame {
            self.tree.set_attr(frame, "src", href);
        }
        if let Some(open) = &el.open_link {
            self.tree.set_attr(open, "href", href);
        }
        if let Some(node) = &el.title {
            self.tree.set_text(node, title);
        }
        if let Some(node) = &el.meta {
            self.tree.set_text(node, meta);
        }

        self.state = ViewerState {
            current_href: href.to_string(),
            current_title: title.to_string(),
            current_meta: meta.to_string(),
        };
    }
}
