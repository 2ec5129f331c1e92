use gloo::events::EventListener;
use web_sys::{Document, Element};

use crate::dom;

const ACTIVE: &str = "active";

/// Hamburger toggle for the mobile menu; any menu link closes it again.
pub fn wire(document: &Document) -> Vec<EventListener> {
    let (Some(hamburger), Some(menu)) = (
        dom::query(document, ".hamburger"),
        dom::query(document, ".nav-menu"),
    ) else {
        log::debug!("event=nav_wire status=skipped reason=missing_elements");
        return Vec::new();
    };

    let mut listeners = Vec::new();
    {
        let (toggle, menu) = (hamburger.clone(), menu.clone());
        listeners.push(EventListener::new(&hamburger, "click", move |_event| {
            toggle_active(&toggle);
            toggle_active(&menu);
        }));
    }

    for link in dom::query_all(document, ".nav-menu a") {
        let (hamburger, menu) = (hamburger.clone(), menu.clone());
        listeners.push(EventListener::new(&link, "click", move |_event| {
            dom::log_failure("nav_close", hamburger.class_list().remove_1(ACTIVE));
            dom::log_failure("nav_close", menu.class_list().remove_1(ACTIVE));
        }));
    }

    listeners
}

fn toggle_active(element: &Element) {
    dom::log_failure("nav_toggle", element.class_list().toggle(ACTIVE));
}
