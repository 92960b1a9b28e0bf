use serde::{Deserialize, Serialize};

use crate::ui::UiTree;

/// A dated course announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub date: String,
    pub text: String,
}

/// Render the newest `limit` announcements as a list, or `empty_text`.
///
/// Items are shown in configured order; the config lists newest first.
pub fn render_announcements<T: UiTree>(
    tree: &T,
    container: &T::Node,
    items: &[Announcement],
    limit: usize,
    empty_text: &str,
) {
    if items.is_empty() || limit == 0 {
        tree.set_text(container, empty_text);
        return;
    }

    tree.clear_children(container);
    let Some(list) = tree.append_element(container, "ul") else {
        return;
    };
    tree.set_class(&list, "links", true);

    for item in items.iter().take(limit) {
        let Some(li) = tree.append_element(&list, "li") else {
            continue;
        };
        if let Some(date) = tree.append_element(&li, "strong") {
            tree.set_text(&date, &format!("{}:", item.date));
        }
        tree.append_text(&li, &format!(" {}", item.text));
    }
}

/// Write `year` into every element matching `selector`.
pub fn stamp_year<T: UiTree>(tree: &T, selector: &str, year: i32) {
    let year = year.to_string();
    for node in tree.find_all(selector) {
        tree.set_text(&node, &year);
    }
}
