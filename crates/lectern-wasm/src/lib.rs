mod dom;
mod fetch;
mod logging;

use std::cell::RefCell;
use std::rc::Rc;

use lectern_core::announcements::{render_announcements, stamp_year};
use lectern_core::media::{load_directory, MediaDirectory};
use lectern_core::ui::UiTree;
use lectern_core::{LectureViewer, SiteConfig, ViewerEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event};

pub use dom::DomTree;
pub use fetch::BrowserFetcher;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();
    if let Err(e) = boot() {
        tracing::warn!("Course page script disabled: {}", js_message(&e));
    }
}

/// Wire the page: announcements, footer year, and the lecture viewer when present.
fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let config = SiteConfig::default();
    let tree = DomTree::new(document.clone());

    if let Some(container) = tree.find(&config.selectors.announcements) {
        let a = &config.announcements;
        render_announcements(&tree, &container, &a.items, a.limit, &config.labels.no_announcements);
    }
    stamp_year(&tree, &config.selectors.year, js_sys::Date::new_0().get_full_year() as i32);

    let mut viewer = LectureViewer::new(tree, config);
    if !viewer.has_viewer() {
        return Ok(());
    }
    viewer.init();
    let media_path = viewer.media_path();
    let viewer = Rc::new(RefCell::new(viewer));

    let on_click = {
        let viewer = Rc::clone(&viewer);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let outcome = with_viewer(&*viewer, "click", |v| v.dispatch(ViewerEvent::Click { target }));
            if outcome.is_some_and(|o| o.prevent_default) {
                event.prevent_default();
            }
        })
    };
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let fetcher = BrowserFetcher::new(window);
    spawn_local(async move {
        let media = load_directory(&fetcher, &media_path).await;
        // Whatever lecture is active now gets refreshed, not the one active at fetch start.
        with_viewer(&*viewer, "media settled", |v| v.dispatch(ViewerEvent::MediaSettled(media)));
    });

    Ok(())
}

/// Run `f` on the viewer, or log and drop the event when it is already borrowed.
fn with_viewer<T: UiTree, R>(
    viewer: &RefCell<LectureViewer<T>>,
    event: &str,
    f: impl FnOnce(&mut LectureViewer<T>) -> R,
) -> Option<R> {
    match viewer.try_borrow_mut() {
        Ok(mut viewer) => Some(f(&mut viewer)),
        Err(_) => {
            tracing::warn!(event, "Viewer busy, event dropped");
            None
        }
    }
}

fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| "unknown js error".into())
}

/// Embeddable player URL for a recording URL.
#[wasm_bindgen]
pub fn embed_url(url: &str) -> String {
    lectern_core::embed::to_embed_url(url)
}

/// Media lookup key for a lecture page path.
#[wasm_bindgen]
pub fn lecture_key(src: &str) -> String {
    lectern_core::lecture_key(src).to_string()
}

/// Lint a media directory document; returns a JSON array of messages.
#[wasm_bindgen]
pub fn media_issues(json: &str) -> String {
    let messages: Vec<String> = match MediaDirectory::from_json(json) {
        Ok(directory) => directory.lint().iter().map(ToString::to_string).collect(),
        Err(e) => vec![e.to_string()],
    };
    serde_json::to_string(&messages).unwrap_or_else(|_| "[]".to_string())
}
