use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::dom;

/// A section counts as current while the scroll offset lies in
/// `(top - offset, top - offset + height]`.
pub fn is_section_active(
    scroll_y: f64,
    section_top: f64,
    section_height: f64,
    offset: f64,
) -> bool {
    let top = section_top - offset;
    scroll_y > top && scroll_y <= top + section_height
}

pub fn wire(window: &Window, document: &Document, offset: f64) -> EventListener {
    let source = window.clone();
    let document = document.clone();
    EventListener::new(window, "scroll", move |_event| {
        let scroll_y = super::scroll_y(&source);
        for section in dom::query_all(&document, "section[id]") {
            let Some(section) = section.dyn_ref::<HtmlElement>() else {
                continue;
            };
            let selector = format!(r##".nav-menu a[href="#{}"]"##, section.id());
            let Some(link) = dom::query(&document, &selector) else {
                continue;
            };
            let active = is_section_active(
                scroll_y,
                f64::from(section.offset_top()),
                f64::from(section.offset_height()),
                offset,
            );
            dom::log_failure(
                "scroll_spy_toggle",
                link.class_list().toggle_with_force("active", active),
            );
        }
    })
}
