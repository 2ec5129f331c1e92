use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::dom;
use crate::error::Result;

const REVEAL_SELECTOR: &str = ".project-card, .contact-card, .skill-category";
const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

const HIDDEN: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(20px)"),
    ("transition", "opacity 0.6s ease, transform 0.6s ease"),
];
const SHOWN: [(&str, &str); 2] = [("opacity", "1"), ("transform", "translateY(0)")];

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Fades cards and sections in as they enter the viewport.
pub struct ScrollReveal {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl ScrollReveal {
    pub fn install(document: &Document) -> Result<Self> {
        let callback: ObserverCallback = Closure::wrap(Box::new(
            |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    if let Ok(target) = entry.target().dyn_into::<HtmlElement>() {
                        apply(&target, &SHOWN);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(THRESHOLD));
        options.set_root_margin(ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let mut observed = 0_usize;
        for element in dom::query_all(document, REVEAL_SELECTOR) {
            if let Some(html) = element.dyn_ref::<HtmlElement>() {
                apply(html, &HIDDEN);
            }
            observer.observe(&element);
            observed += 1;
        }
        log::debug!("event=reveal_install status=ok observed={observed}");

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ScrollReveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn apply(element: &HtmlElement, styles: &[(&str, &str)]) {
    for (property, value) in styles {
        dom::set_style(element, property, value);
    }
}
