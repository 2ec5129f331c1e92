use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;

const CONTACT_ANCHOR: &str = "#contact";

/// Where a click on an in-page anchor scrolls to. The contact anchor sits at
/// the foot of the page, so it goes to the full document height; everything
/// else stops `header_offset` above its target.
pub fn scroll_destination(
    href: &str,
    target_top: f64,
    document_height: f64,
    header_offset: f64,
) -> f64 {
    if href == CONTACT_ANCHOR {
        document_height
    } else {
        target_top - header_offset
    }
}

pub fn wire(window: &Window, document: &Document, header_offset: f64) -> Vec<EventListener> {
    dom::query_all(document, r##"a[href^="#"]"##)
        .into_iter()
        .map(|anchor| {
            let window = window.clone();
            let document = document.clone();
            let trigger = anchor.clone();
            EventListener::new_with_options(
                &trigger,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let Some(href) = anchor.get_attribute("href") else {
                        return;
                    };
                    let Some(target) = dom::query(&document, &href) else {
                        return;
                    };

                    let target_top = target
                        .dyn_ref::<HtmlElement>()
                        .map_or(0.0, |element| f64::from(element.offset_top()));
                    let document_height = document
                        .document_element()
                        .map_or(0.0, |root| f64::from(root.scroll_height()));

                    let options = ScrollToOptions::new();
                    options.set_top(scroll_destination(
                        &href,
                        target_top,
                        document_height,
                        header_offset,
                    ));
                    options.set_behavior(ScrollBehavior::Smooth);
                    window.scroll_to_with_scroll_to_options(&options);
                },
            )
        })
        .collect()
}
