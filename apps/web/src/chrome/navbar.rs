use gloo::events::EventListener;
use web_sys::{Document, Window};

use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

const RESTING: NavbarStyle = NavbarStyle {
    background: "rgba(26, 15, 15, 0.95)",
    box_shadow: "none",
};

const SCROLLED: NavbarStyle = NavbarStyle {
    background: "rgba(26, 15, 15, 0.98)",
    box_shadow: "0 4px 12px rgba(0, 0, 0, 0.4)",
};

pub fn navbar_style(scroll_y: f64, threshold: f64) -> NavbarStyle {
    if scroll_y > threshold {
        SCROLLED
    } else {
        RESTING
    }
}

pub fn wire(window: &Window, document: &Document, threshold: f64) -> Option<EventListener> {
    let Some(navbar) = dom::query_html(document, ".navbar") else {
        log::debug!("event=navbar_wire status=skipped reason=missing_navbar");
        return None;
    };

    let source = window.clone();
    Some(EventListener::new(window, "scroll", move |_event| {
        let style = navbar_style(super::scroll_y(&source), threshold);
        dom::set_style(&navbar, "background", style.background);
        dom::set_style(&navbar, "box-shadow", style.box_shadow);
    }))
}

#[cfg(test)]
mod tests {
    use super::{navbar_style, RESTING, SCROLLED};

    #[test]
    fn style_switches_only_past_threshold() {
        assert_eq!(navbar_style(0.0, 100.0), RESTING);
        assert_eq!(navbar_style(100.0, 100.0), RESTING);
        assert_eq!(navbar_style(100.5, 100.0), SCROLLED);
        assert_eq!(SCROLLED.box_shadow, "0 4px 12px rgba(0, 0, 0, 0.4)");
    }
}
