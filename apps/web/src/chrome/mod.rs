//! Page-chrome interactions: navigation, scrolling effects and click ripples.
//!
//! Each behavior wires its listeners once and skips itself when the
//! elements it decorates are missing from the page.

mod nav;
mod navbar;
mod parallax;
mod ripple;
mod scroll_spy;
mod smooth_scroll;

use gloo::events::EventListener;
use web_sys::{Document, Window};

use crate::config::PortfolioConfig;

pub use navbar::{navbar_style, NavbarStyle};
pub use parallax::{parallax_frame, ParallaxFrame};
pub use ripple::{ripple_geometry, RippleGeometry};
pub use scroll_spy::is_section_active;
pub use smooth_scroll::scroll_destination;

/// Listeners for every chrome behavior; dropping it detaches them.
pub struct PageChrome {
    listeners: Vec<EventListener>,
}

impl PageChrome {
    pub fn wire(window: &Window, document: &Document, config: &PortfolioConfig) -> Self {
        let mut listeners = Vec::new();
        listeners.extend(nav::wire(document));
        listeners.extend(smooth_scroll::wire(window, document, config.header_offset));
        listeners.extend(navbar::wire(window, document, config.navbar_threshold));
        listeners.push(scroll_spy::wire(window, document, config.scroll_spy_offset));
        listeners.extend(parallax::wire(
            window,
            document,
            config.parallax_limit,
            config.parallax_rate,
        ));
        listeners.push(ripple::wire(document, config.ripple_duration_ms));

        log::debug!("event=chrome_wire status=ok listeners={}", listeners.len());
        Self { listeners }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Vertical scroll offset of the page.
fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}
