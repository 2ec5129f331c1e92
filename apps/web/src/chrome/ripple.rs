use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::dom;

const RIPPLE_TARGETS: &str = ".btn, .project-card";

/// Square ripple covering the target, centred on the click point, in the
/// target's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

pub fn ripple_geometry(
    rect_left: f64,
    rect_top: f64,
    rect_width: f64,
    rect_height: f64,
    client_x: f64,
    client_y: f64,
) -> RippleGeometry {
    let size = rect_width.max(rect_height);
    RippleGeometry {
        size,
        left: client_x - rect_left - size / 2.0,
        top: client_y - rect_top - size / 2.0,
    }
}

pub fn wire(document: &Document, duration_ms: u32) -> EventListener {
    let owner = document.clone();
    EventListener::new(document, "click", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let Some(target) = dom::closest(event.target(), RIPPLE_TARGETS)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if let Err(error) = spawn_ripple(&owner, &target, mouse, duration_ms) {
            log::debug!("event=ripple status=failed error=\"{error}\"");
        }
    })
}

fn spawn_ripple(
    document: &Document,
    target: &HtmlElement,
    event: &MouseEvent,
    duration_ms: u32,
) -> crate::error::Result<()> {
    let rect = target.get_bounding_client_rect();
    let geometry = ripple_geometry(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    );

    let ripple = document
        .create_element("span")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| crate::error::PortfolioError::Dom("span is not an HtmlElement".into()))?;
    let size = format!("{}px", geometry.size);
    dom::set_style(&ripple, "width", &size);
    dom::set_style(&ripple, "height", &size);
    dom::set_style(&ripple, "left", &format!("{}px", geometry.left));
    dom::set_style(&ripple, "top", &format!("{}px", geometry.top));
    ripple.class_list().add_1("ripple")?;

    dom::set_style(target, "position", "relative");
    dom::set_style(target, "overflow", "hidden");
    target.append_child(&ripple)?;

    Timeout::new(duration_ms, move || ripple.remove()).forget();
    Ok(())
}
