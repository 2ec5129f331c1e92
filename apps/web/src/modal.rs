use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::catalog::{non_empty, non_empty_str, Project, ProjectId, ProjectStore};
use crate::dom;
use crate::error::{PortfolioError, Result};
use crate::grid::tech_tags;
use crate::markup::{self, Node};

pub const MODAL_ID: &str = "projectModal";
pub const MODAL_BODY_ID: &str = "modalBody";
pub const CLOSE_SELECTOR: &str = ".modal-close";
/// Elements carrying this attribute open the modal for the named project.
pub const OPEN_ATTRIBUTE: &str = "data-modal-project";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(ProjectId),
}

/// Tech tag header shown above the description.
pub fn modal_header(project: &Project) -> markup::Element {
    markup::Element::new("div")
        .class("modal-header")
        .child(tech_tags(&project.tech, "modal-tech-tags"))
}

fn section_heading(text: impl Into<String>) -> Node {
    markup::Element::new("h3").text(text).into()
}

fn list(tag: &'static str, items: &[String], prefix: &str) -> Node {
    markup::Element::new(tag)
        .children(
            items
                .iter()
                .map(|item| markup::Element::new("li").text(format!("{prefix}{item}"))),
        )
        .into()
}

/// Description body for a project. Empty when the project has no
/// `fullDescription`; otherwise each subsection appears only when its field
/// is present and non-empty, in a fixed order.
pub fn modal_content(project: &Project) -> Vec<Node> {
    let Some(full) = &project.full_description else {
        return Vec::new();
    };

    let heading = match project.tagline() {
        Some(tagline) => format!("{} - {tagline}", project.title),
        None => project.title.clone(),
    };
    let mut nodes = vec![markup::Element::new("h2").text(heading).into()];

    if let Some(intro) = non_empty_str(full.intro.as_deref()) {
        nodes.push(markup::Element::new("p").text(intro).into());
    }

    if let Some(features) = non_empty(full.key_features.as_deref()) {
        nodes.push(section_heading("Key Features"));
        nodes.extend(features.iter().map(|feature| {
            markup::Element::new("div")
                .class("modal-feature")
                .child(markup::Element::new("h4").text(&feature.title))
                .child(markup::Element::new("p").text(&feature.description))
                .into()
        }));
    }

    if let Some(pricing) = &full.pricing {
        nodes.push(section_heading("Pricing"));
        let mut box_ = markup::Element::new("div")
            .class("pricing-box")
            .child(markup::Element::new("h4").text(&pricing.price));
        if !pricing.features.is_empty() {
            box_ = box_.child(list("ul", &pricing.features, "\u{2713} "));
        }
        nodes.push(box_.into());
    }

    if let Some(items) = non_empty(full.perfect_for.as_deref()) {
        nodes.push(section_heading("Perfect For"));
        nodes.push(list("ul", items, ""));
    }

    if let Some(specs) = non_empty(full.technical_specs.as_deref()) {
        nodes.push(section_heading("Technical Specifications"));
        nodes.push(list("ul", specs, ""));
    }

    if let Some(quote) = non_empty_str(full.quote.as_deref()) {
        nodes.push(section_heading(format!(
            "Why Developers Love {}",
            project.title
        )));
        nodes.push(markup::Element::new("blockquote").text(quote).into());
    }

    if let Some(steps) = non_empty(full.getting_started.as_deref()) {
        nodes.push(section_heading("Getting Started"));
        nodes.push(list("ol", steps, ""));
    }

    nodes
}

/// Everything rendered into the modal body for `project`.
pub fn modal_view(project: &Project) -> Vec<Node> {
    vec![
        modal_header(project).into(),
        markup::Element::new("div")
            .class("modal-body")
            .children(modal_content(project))
            .into(),
    ]
}

/// Presentation surface the modal drives.
pub trait ModalView {
    fn render(&self, nodes: &[Node]) -> Result<()>;
    fn set_visible(&self, visible: bool);
    /// Current `overflow` of the page body, empty when unset.
    fn page_overflow(&self) -> String;
    /// Sets the page body's `overflow`; an empty value clears it.
    fn set_page_overflow(&self, value: &str);
}

pub struct Modal<V> {
    view: V,
    store: Rc<ProjectStore>,
    state: ModalState,
    saved_overflow: Option<String>,
}

impl<V: ModalView> Modal<V> {
    pub fn new(view: V, store: Rc<ProjectStore>) -> Self {
        Self {
            view,
            store,
            state: ModalState::Closed,
            saved_overflow: None,
        }
    }

    pub fn attach_store(&mut self, store: Rc<ProjectStore>) {
        self.store = store;
    }

    pub const fn state(&self) -> &ModalState {
        &self.state
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// Shows details for `id`. Unknown ids leave everything untouched.
    pub fn open(&mut self, id: &str) {
        let Some(project) = self.store.get(id) else {
            log::debug!("event=modal_open status=ignored reason=unknown_id id={id}");
            return;
        };

        if let Err(error) = self.view.render(&modal_view(project)) {
            log::error!("event=modal_open status=failed id={id} error=\"{error}\"");
            return;
        }

        if !self.is_open() {
            self.saved_overflow = Some(self.view.page_overflow());
            self.view.set_visible(true);
            self.view.set_page_overflow("hidden");
        }
        self.state = ModalState::Open(project.id.clone());
    }

    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.view.set_visible(false);
        let previous = self.saved_overflow.take().unwrap_or_default();
        self.view.set_page_overflow(&previous);
        self.state = ModalState::Closed;
    }
}

/// Modal surface backed by the page's modal elements.
pub struct DomModalView {
    document: Document,
    root: HtmlElement,
    body: Element,
}

impl ModalView for DomModalView {
    fn render(&self, nodes: &[Node]) -> Result<()> {
        dom::replace_children(&self.document, &self.body, nodes)
    }

    fn set_visible(&self, visible: bool) {
        dom::set_style(&self.root, "display", if visible { "block" } else { "none" });
    }

    fn page_overflow(&self) -> String {
        self.document
            .body()
            .map(|body| dom::style_value(&body, "overflow"))
            .unwrap_or_default()
    }

    fn set_page_overflow(&self, value: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        if value.is_empty() {
            dom::log_failure("overflow_restore", body.style().remove_property("overflow"));
        } else {
            dom::set_style(&body, "overflow", value);
        }
    }
}

/// Page elements the modal drives.
pub struct ModalElements {
    pub root: HtmlElement,
    pub body: Element,
    pub close: Option<Element>,
}

impl ModalElements {
    /// Looks up `#projectModal`, `#modalBody` and the optional close button.
    pub fn find(document: &Document) -> Result<Self> {
        let root = dom::by_id(document, MODAL_ID)
            .ok_or(PortfolioError::MissingElement("#projectModal"))?;
        let body = document
            .get_element_by_id(MODAL_BODY_ID)
            .ok_or(PortfolioError::MissingElement("#modalBody"))?;
        let close = dom::query(document, CLOSE_SELECTOR);
        Ok(Self { root, body, close })
    }
}

/// The wired modal: state plus its close/open listeners.
pub struct ModalController {
    modal: Rc<RefCell<Modal<DomModalView>>>,
    _listeners: Vec<EventListener>,
}

impl ModalController {
    pub fn new(
        document: &Document,
        elements: ModalElements,
        store: Rc<ProjectStore>,
    ) -> Result<Self> {
        let ModalElements { root, body, close } = elements;
        let window = dom::window()?;

        let view = DomModalView {
            document: document.clone(),
            root: root.clone(),
            body,
        };
        let modal = Rc::new(RefCell::new(Modal::new(view, store)));
        let mut listeners = Vec::new();

        if let Some(close) = close {
            let modal = Rc::clone(&modal);
            listeners.push(EventListener::new(&close, "click", move |_event| {
                modal.borrow_mut().close();
            }));
        }

        {
            let modal = Rc::clone(&modal);
            listeners.push(EventListener::new(&window, "click", move |event| {
                let on_backdrop = event
                    .target()
                    .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
                    .is_some_and(|target| root.is_same_node(Some(&target)));
                if on_backdrop {
                    modal.borrow_mut().close();
                }
            }));
        }

        {
            let modal = Rc::clone(&modal);
            listeners.push(EventListener::new(document, "keydown", move |event| {
                let is_escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|key| key.key() == "Escape");
                if is_escape && modal.borrow().is_open() {
                    modal.borrow_mut().close();
                }
            }));
        }

        {
            let modal = Rc::clone(&modal);
            let selector = format!("[{OPEN_ATTRIBUTE}]");
            listeners.push(EventListener::new(document, "click", move |event| {
                let id = dom::closest(event.target(), &selector)
                    .and_then(|trigger| trigger.get_attribute(OPEN_ATTRIBUTE));
                if let Some(id) = id {
                    modal.borrow_mut().open(&id);
                }
            }));
        }

        Ok(Self {
            modal,
            _listeners: listeners,
        })
    }

    pub fn attach_store(&self, store: Rc<ProjectStore>) {
        self.modal.borrow_mut().attach_store(store);
    }

    pub fn open(&self, id: &str) {
        self.modal.borrow_mut().open(id);
    }

    pub fn close(&self) {
        self.modal.borrow_mut().close();
    }

    pub fn state(&self) -> ModalState {
        self.modal.borrow().state().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::{modal_content, modal_view, Modal, ModalState, ModalView};
    use crate::catalog::tests::{EXAMPLE_CATALOG, RICH_CATALOG};
    use crate::catalog::{Catalog, Project, ProjectId, ProjectStore};
    use crate::error::Result;
    use crate::markup::Node;

    #[derive(Default)]
    struct RecordingView {
        rendered: RefCell<Vec<Node>>,
        visible: Cell<bool>,
        overflow: RefCell<String>,
        renders: Cell<usize>,
    }

    impl ModalView for &RecordingView {
        fn render(&self, nodes: &[Node]) -> Result<()> {
            *self.rendered.borrow_mut() = nodes.to_vec();
            self.renders.set(self.renders.get() + 1);
            Ok(())
        }

        fn set_visible(&self, visible: bool) {
            self.visible.set(visible);
        }

        fn page_overflow(&self) -> String {
            self.overflow.borrow().clone()
        }

        fn set_page_overflow(&self, value: &str) {
            *self.overflow.borrow_mut() = value.to_string();
        }
    }

    fn store(json: &str) -> Rc<ProjectStore> {
        Rc::new(ProjectStore::from_catalog(Catalog::from_json(json).unwrap()))
    }

    fn headings(nodes: &[Node]) -> Vec<String> {
        nodes
            .iter()
            .filter_map(Node::as_element)
            .filter(|element| element.tag == "h3")
            .map(|element| element.text_content())
            .collect()
    }

    fn rich_project() -> Project {
        Catalog::from_json(RICH_CATALOG).unwrap().projects.remove(0)
    }

    #[test]
    fn full_description_renders_every_section_in_order() {
        let nodes = modal_content(&rich_project());
        assert_eq!(nodes[0].text_content(), "Lumen - Notes that glow");
        assert_eq!(nodes[1].text_content(), "Lumen keeps your notes.");
        assert_eq!(
            headings(&nodes),
            [
                "Key Features",
                "Pricing",
                "Perfect For",
                "Technical Specifications",
                "Why Developers Love Lumen",
                "Getting Started",
            ]
        );

        let tags: Vec<_> = nodes.iter().filter_map(Node::as_element).map(|e| e.tag).collect();
        assert!(tags.contains(&"blockquote"));
        let steps = nodes
            .iter()
            .filter_map(Node::as_element)
            .find(|element| element.tag == "ol")
            .unwrap();
        assert_eq!(steps.find_by_tag("li").len(), 2);

        let pricing = nodes
            .iter()
            .filter_map(Node::as_element)
            .find(|element| element.has_class("pricing-box"))
            .unwrap();
        assert_eq!(pricing.find_by_tag("h4")[0].text_content(), "$4/mo");
        assert_eq!(pricing.find_by_tag("li")[0].text_content(), "\u{2713} Unlimited notes");
    }

    #[test]
    fn absent_or_empty_fields_emit_no_heading() {
        let json = r#"{"projects":[{"id":"p","title":"Plain","fullDescription":{
            "intro": "Only intro.",
            "perfectFor": [],
            "quote": ""
        }}]}"#;
        let project = Catalog::from_json(json).unwrap().projects.remove(0);
        let nodes = modal_content(&project);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].text_content(), "Plain");
        assert!(headings(&nodes).is_empty());
    }

    #[test]
    fn missing_full_description_yields_empty_body() {
        let project = Catalog::from_json(EXAMPLE_CATALOG).unwrap().projects.remove(1);
        assert!(modal_content(&project).is_empty());
    }

    #[test]
    fn content_is_a_pure_function_of_the_record() {
        let project = rich_project();
        assert_eq!(modal_view(&project), modal_view(&project));
    }

    #[test]
    fn example_open_renders_tags_and_empty_body() {
        let view = RecordingView::default();
        let mut modal = Modal::new(&view, store(EXAMPLE_CATALOG));

        modal.open("b");
        assert_eq!(modal.state(), &ModalState::Open(ProjectId::new("b")));
        assert!(view.visible.get());

        let rendered = view.rendered.borrow();
        let header = rendered[0].as_element().unwrap();
        assert!(header.has_class("modal-header"));
        assert_eq!(header.find_by_class("tech-tag")[0].text_content(), "Y");
        let body = rendered[1].as_element().unwrap();
        assert!(body.has_class("modal-body"));
        assert!(body.children.is_empty());
    }

    #[test]
    fn unknown_id_is_a_no_op_when_closed() {
        let view = RecordingView::default();
        let mut modal = Modal::new(&view, store(EXAMPLE_CATALOG));

        modal.open("c");
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!view.visible.get());
        assert_eq!(view.renders.get(), 0);
    }

    #[test]
    fn unknown_id_keeps_current_project_open() {
        let view = RecordingView::default();
        let mut modal = Modal::new(&view, store(EXAMPLE_CATALOG));

        modal.open("a");
        modal.open("c");
        assert_eq!(modal.state(), &ModalState::Open(ProjectId::new("a")));
        assert_eq!(view.renders.get(), 1);
    }

    #[test]
    fn open_while_open_rerenders_without_closing() {
        let view = RecordingView::default();
        let mut modal = Modal::new(&view, store(EXAMPLE_CATALOG));

        modal.open("a");
        modal.open("b");
        assert_eq!(modal.state(), &ModalState::Open(ProjectId::new("b")));
        assert_eq!(view.renders.get(), 2);
        assert!(view.visible.get());
        assert_eq!(*view.overflow.borrow(), "hidden");
    }

    #[test]
    fn close_restores_page_scroll() {
        let view = RecordingView::default();
        *view.overflow.borrow_mut() = "scroll".to_string();
        let mut modal = Modal::new(&view, store(EXAMPLE_CATALOG));

        modal.open("a");
        assert_eq!(*view.overflow.borrow(), "hidden");
        modal.open("b");
        modal.close();

        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!view.visible.get());
        assert_eq!(*view.overflow.borrow(), "scroll");
    }

    #[test]
    fn close_when_closed_changes_nothing() {
        let view = RecordingView::default();
        *view.overflow.borrow_mut() = "auto".to_string();
        let mut modal = Modal::new(&view, store(EXAMPLE_CATALOG));

        modal.close();
        assert_eq!(*view.overflow.borrow(), "auto");
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn attached_store_resolves_later_ids() {
        let view = RecordingView::default();
        let mut modal = Modal::new(&view, Rc::new(ProjectStore::default()));
        modal.open("a");
        assert!(!modal.is_open());

        modal.attach_store(store(EXAMPLE_CATALOG));
        modal.open("a");
        assert!(modal.is_open());
    }
}
