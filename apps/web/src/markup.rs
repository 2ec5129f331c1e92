//! Plain node trees describing the markup the page components produce.
//!
//! Components build these trees without touching the DOM, which keeps
//! card and modal construction pure; `dom::materialize` turns a tree into
//! real elements. Text is always carried as text, never as HTML.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Self::Element(element) => element.text_content(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends `child` only when present.
    #[must_use]
    pub fn maybe_child(self, child: Option<impl Into<Node>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(Node::text(value))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| *candidate == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Depth-first search over this element and its descendants.
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&Self) -> bool) -> Vec<&'a Self> {
        let mut found = Vec::new();
        self.collect(predicate, &mut found);
        found
    }

    fn collect<'a>(&'a self, predicate: &dyn Fn(&Self) -> bool, found: &mut Vec<&'a Self>) {
        if predicate(self) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect(predicate, found);
        }
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&Self> {
        self.find_all(&|element| element.has_class(class))
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<&Self> {
        self.find_all(&|element| element.tag == tag)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Element, Node};

    fn sample() -> Element {
        Element::new("div")
            .class("card")
            .class("featured")
            .attr("data-project", "a")
            .child(Element::new("h3").class("title").text("Alpha"))
            .child(
                Element::new("ul")
                    .children(["one", "two"].map(|item| Element::new("li").text(item))),
            )
            .maybe_child(None::<Element>)
    }

    #[test]
    fn builder_collects_classes_and_attributes() {
        let card = sample();
        assert!(card.has_class("featured"));
        assert!(!card.has_class("title"));
        assert_eq!(card.class_name(), "card featured");
        assert_eq!(card.attribute("data-project"), Some("a"));
        assert_eq!(card.attribute("href"), None);
    }

    #[test]
    fn absent_optional_child_adds_nothing() {
        assert_eq!(sample().children.len(), 2);
    }

    #[test]
    fn queries_walk_descendants_in_document_order() {
        let card = sample();
        let items: Vec<_> = card
            .find_by_tag("li")
            .iter()
            .map(|li| li.text_content())
            .collect();
        assert_eq!(items, ["one", "two"]);
        assert_eq!(card.find_by_class("title").len(), 1);
    }

    #[test]
    fn text_content_concatenates_descendants() {
        assert_eq!(Node::from(sample()).text_content(), "Alphaonetwo");
    }
}
