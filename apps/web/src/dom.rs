//! Thin helpers over `web-sys` shared by the page components.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::error::{PortfolioError, Result};
use crate::markup::{self, Node};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(PortfolioError::MissingElement("window"))
}

pub fn document(window: &Window) -> Result<Document> {
    window
        .document()
        .ok_or(PortfolioError::MissingElement("document"))
}

/// First match for `selector`, or `None` when absent or the selector is invalid.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    query(document, selector).and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub fn closest(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    target?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    log_failure("style_write", element.style().set_property(property, value));
}

/// Unwraps a best-effort DOM call, logging a failure at `debug`.
pub fn log_failure<T, E>(operation: &str, result: std::result::Result<T, E>) -> Option<T>
where
    E: Into<PortfolioError>,
{
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            let error = error.into();
            log::debug!("event={operation} status=failed error=\"{error}\"");
            None
        }
    }
}

pub fn style_value(element: &HtmlElement, property: &str) -> String {
    element
        .style()
        .get_property_value(property)
        .unwrap_or_default()
}

/// Milliseconds on the page's high resolution clock.
pub fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map_or_else(js_sys::Date::now, |performance| performance.now())
}

/// Builds real DOM nodes for a markup tree.
pub fn materialize(document: &Document, node: &Node) -> Result<web_sys::Node> {
    match node {
        Node::Text(text) => Ok(document.create_text_node(text).into()),
        Node::Element(element) => Ok(materialize_element(document, element)?.into()),
    }
}

pub fn materialize_element(document: &Document, element: &markup::Element) -> Result<Element> {
    let created = document.create_element(element.tag)?;
    if !element.classes.is_empty() {
        created.set_class_name(&element.class_name());
    }
    for (name, value) in &element.attributes {
        created.set_attribute(name, value)?;
    }
    for child in &element.children {
        created.append_child(&materialize(document, child)?)?;
    }
    Ok(created)
}

/// Replaces every child of `parent` with the given trees.
pub fn replace_children(document: &Document, parent: &Element, nodes: &[Node]) -> Result<()> {
    parent.set_text_content(None);
    for node in nodes {
        parent.append_child(&materialize(document, node)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::log_failure;
    use crate::error::PortfolioError;

    #[test]
    fn successful_call_passes_its_value_through() {
        let result: Result<u32, PortfolioError> = Ok(7);
        assert_eq!(log_failure("class_toggle", result), Some(7));
    }

    #[test]
    fn failed_call_is_absorbed() {
        let result: Result<bool, PortfolioError> =
            Err(PortfolioError::Dom("NotSupportedError".to_string()));
        assert_eq!(log_failure("class_toggle", result), None);
    }
}
