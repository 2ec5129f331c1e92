use gloo::events::EventListener;
use web_sys::{Document, Window};

use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxFrame {
    pub translate_y: f64,
    pub opacity: f64,
}

/// Hero offset and fade for a scroll position; `None` once past `limit`,
/// where the hero keeps its last applied frame.
pub fn parallax_frame(scroll_y: f64, limit: f64, rate: f64) -> Option<ParallaxFrame> {
    (scroll_y < limit).then(|| ParallaxFrame {
        translate_y: scroll_y * rate,
        opacity: 1.0 - scroll_y / limit,
    })
}

pub fn wire(
    window: &Window,
    document: &Document,
    limit: f64,
    rate: f64,
) -> Option<EventListener> {
    let Some(hero) = dom::query_html(document, ".hero-content") else {
        log::debug!("event=parallax_wire status=skipped reason=missing_hero");
        return None;
    };

    let source = window.clone();
    Some(EventListener::new(window, "scroll", move |_event| {
        if let Some(frame) = parallax_frame(super::scroll_y(&source), limit, rate) {
            dom::set_style(&hero, "transform", &format!("translateY({}px)", frame.translate_y));
            dom::set_style(&hero, "opacity", &frame.opacity.to_string());
        }
    }))
}
