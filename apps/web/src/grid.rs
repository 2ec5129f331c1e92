use gloo::events::EventListener;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::carousel::{AutoScroller, CarouselSettings};
use crate::catalog::{Project, ProjectId};
use crate::config::PortfolioConfig;
use crate::dom;
use crate::error::{PortfolioError, Result};
use crate::markup;

pub const GRID_ROOT_ID: &str = "projectsGrid";
const OTHERS_HEADING: &str = "Main Projects";

/// Splits projects into `(featured, others)`, each in catalog order.
pub fn partition(projects: &[Project]) -> (Vec<&Project>, Vec<&Project>) {
    projects.iter().partition(|project| project.featured)
}

/// Characters `encodeURIComponent` leaves as they are.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn detail_url(detail_page: &str, id: &ProjectId) -> String {
    let id = utf8_percent_encode(id.as_str(), QUERY_VALUE);
    format!("{detail_page}?id={id}")
}

pub const fn action_label(project: &Project) -> &'static str {
    if project.featured {
        "Learn More"
    } else {
        "View Details"
    }
}

pub fn project_card(project: &Project) -> markup::Element {
    let mut card = markup::Element::new("div").class("project-card");
    if project.featured {
        card = card.class("featured");
    }

    let mut image = markup::Element::new("div").class("project-image").child(
        markup::Element::new("img")
            .attr("src", &project.image)
            .attr("alt", format!("{} App Screenshot", project.title)),
    );
    if project.featured {
        image = image.child(
            markup::Element::new("div")
                .class("project-overlay")
                .child(markup::Element::new("span").class("project-badge").text("Featured")),
        );
    }

    let features = project.features().map(|features| {
        markup::Element::new("div")
            .class("project-features")
            .children(features.iter().map(|feature| {
                markup::Element::new("div")
                    .class("feature")
                    .child(
                        markup::Element::new("span")
                            .class("feature-icon")
                            .text(&feature.icon),
                    )
                    .child(markup::Element::new("span").text(&feature.text))
            }))
    });

    let content = markup::Element::new("div")
        .class("project-content")
        .child(
            markup::Element::new("h3")
                .class("project-title")
                .text(&project.title),
        )
        .maybe_child(project.tagline().map(|tagline| {
            markup::Element::new("p")
                .class("project-tagline")
                .text(tagline)
        }))
        .child(
            markup::Element::new("p")
                .class("project-description")
                .text(&project.description),
        )
        .maybe_child(features)
        .child(tech_tags(&project.tech, "project-tech"))
        .child(
            markup::Element::new("button")
                .class("btn")
                .class("btn-project")
                .attr("type", "button")
                .text(action_label(project)),
        );

    card.attr("data-project", project.id.as_str())
        .child(image)
        .child(content)
}

/// `span.tech-tag` per label inside a container carrying `container_class`.
pub fn tech_tags(tech: &[String], container_class: &'static str) -> markup::Element {
    markup::Element::new("div")
        .class(container_class)
        .children(
            tech.iter()
                .map(|label| markup::Element::new("span").class("tech-tag").text(label)),
        )
}

/// The two grid sections; a section is `None` when its partition is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub featured: Option<markup::Element>,
    pub others: Option<markup::Element>,
}

impl GridLayout {
    pub fn build(projects: &[Project]) -> Self {
        let (featured, others) = partition(projects);

        let featured = (!featured.is_empty()).then(|| {
            markup::Element::new("div")
                .class("featured-project")
                .children(featured.into_iter().map(project_card))
        });

        let others = (!others.is_empty()).then(|| {
            markup::Element::new("div")
                .class("other-projects")
                .child(markup::Element::new("h3").text(OTHERS_HEADING))
                .child(
                    markup::Element::new("div")
                        .class("projects-scroll")
                        .children(others.into_iter().map(project_card)),
                )
        });

        Self { featured, others }
    }

    /// Sections in the order they are appended to the grid root.
    pub fn sections(&self) -> impl Iterator<Item = &markup::Element> {
        self.featured.iter().chain(self.others.iter())
    }
}

/// The rendered grid. Owns the card listeners and the carousel; dropping it
/// detaches both.
pub struct ProjectGrid {
    _listeners: Vec<EventListener>,
    carousel: Option<AutoScroller>,
}

impl ProjectGrid {
    pub fn render(
        document: &Document,
        root: &Element,
        projects: &[Project],
        config: &PortfolioConfig,
    ) -> Result<Self> {
        let layout = GridLayout::build(projects);

        let mut scroll_container = None;
        if let Some(section) = &layout.featured {
            let element = dom::materialize_element(document, section)?;
            root.append_child(&element)?;
        }
        if let Some(section) = &layout.others {
            let element = dom::materialize_element(document, section)?;
            root.append_child(&element)?;
            scroll_container = element
                .query_selector(".projects-scroll")?
                .and_then(|container| container.dyn_into::<HtmlElement>().ok());
        }

        let listeners = wire_navigation(root, &config.detail_page)?;

        let carousel = scroll_container
            .map(|container| AutoScroller::start(container, CarouselSettings::from(config)))
            .transpose()?;

        log::info!(
            "event=grid_render status=ok projects={} featured={} others={}",
            projects.len(),
            layout.featured.as_ref().map_or(0, |s| s.find_by_class("project-card").len()),
            layout.others.as_ref().map_or(0, |s| s.find_by_class("project-card").len()),
        );

        Ok(Self {
            _listeners: listeners,
            carousel,
        })
    }

    pub const fn carousel(&self) -> Option<&AutoScroller> {
        self.carousel.as_ref()
    }
}

fn wire_navigation(root: &Element, detail_page: &str) -> Result<Vec<EventListener>> {
    let cards = root.query_selector_all(".project-card")?;
    let mut listeners = Vec::new();

    for index in 0..cards.length() {
        let Some(card) = cards
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let Some(id) = card.get_attribute("data-project") else {
            continue;
        };
        let url = detail_url(detail_page, &ProjectId::new(id));

        if let Some(button) = card.query_selector("button")? {
            let url = url.clone();
            listeners.push(EventListener::new(&button, "click", move |_event| {
                navigate(&url);
            }));
        }

        listeners.push(EventListener::new(&card, "click", move |event| {
            if dom::closest(event.target(), "button").is_some() {
                return;
            }
            navigate(&url);
        }));
    }

    Ok(listeners)
}

fn navigate(url: &str) {
    let result = dom::window().and_then(|window| {
        window
            .location()
            .set_href(url)
            .map_err(PortfolioError::from)
    });
    if let Err(error) = result {
        log::error!("event=navigate status=failed url={url} error=\"{error}\"");
    }
}

#[cfg(test)]
mod tests {
    use super::{detail_url, partition, project_card, GridLayout};
    use crate::catalog::tests::{EXAMPLE_CATALOG, RICH_CATALOG};
    use crate::catalog::{Catalog, Project, ProjectId};

    fn projects(json: &str) -> Vec<Project> {
        Catalog::from_json(json).unwrap().projects
    }

    fn mixed() -> Vec<Project> {
        projects(
            r#"{"projects":[
                {"id":"1","title":"One","featured":false},
                {"id":"2","title":"Two","featured":true},
                {"id":"3","title":"Three","featured":false},
                {"id":"4","title":"Four","featured":true},
                {"id":"5","title":"Five"}
            ]}"#,
        )
    }

    fn card_titles(section: &crate::markup::Element) -> Vec<String> {
        section
            .find_by_class("project-title")
            .iter()
            .map(|title| title.text_content())
            .collect()
    }

    #[test]
    fn partition_preserves_relative_order() {
        let projects = mixed();
        let (featured, others) = partition(&projects);
        let featured: Vec<_> = featured.iter().map(|p| p.title.as_str()).collect();
        let others: Vec<_> = others.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(featured, ["Two", "Four"]);
        assert_eq!(others, ["One", "Three", "Five"]);
    }

    #[test]
    fn layout_places_cards_in_their_sections() {
        let layout = GridLayout::build(&mixed());
        let featured = layout.featured.as_ref().unwrap();
        let others = layout.others.as_ref().unwrap();

        assert!(featured.has_class("featured-project"));
        assert_eq!(card_titles(featured), ["Two", "Four"]);

        assert!(others.has_class("other-projects"));
        assert_eq!(others.find_by_tag("h3")[0].text_content(), "Main Projects");
        let scroll = others.find_by_class("projects-scroll");
        assert_eq!(scroll.len(), 1);
        assert_eq!(card_titles(scroll[0]), ["One", "Three", "Five"]);

        let order: Vec<_> = layout.sections().map(|s| s.classes[0]).collect();
        assert_eq!(order, ["featured-project", "other-projects"]);
    }

    #[test]
    fn empty_partitions_create_no_section() {
        let only_featured = projects(r#"{"projects":[{"id":"a","featured":true}]}"#);
        let layout = GridLayout::build(&only_featured);
        assert!(layout.featured.is_some());
        assert!(layout.others.is_none());

        let only_others = projects(r#"{"projects":[{"id":"a"}]}"#);
        let layout = GridLayout::build(&only_others);
        assert!(layout.featured.is_none());
        assert!(layout.others.is_some());

        let layout = GridLayout::build(&[]);
        assert_eq!(layout.sections().count(), 0);
    }

    #[test]
    fn example_catalog_renders_alpha_featured_and_beta_other() {
        let layout = GridLayout::build(&projects(EXAMPLE_CATALOG));
        assert_eq!(card_titles(layout.featured.as_ref().unwrap()), ["Alpha"]);
        assert_eq!(card_titles(layout.others.as_ref().unwrap()), ["Beta"]);
    }

    #[test]
    fn featured_card_has_badge_and_learn_more() {
        let project = &projects(RICH_CATALOG)[0];
        let card = project_card(project);

        assert!(card.has_class("project-card"));
        assert!(card.has_class("featured"));
        assert_eq!(card.attribute("data-project"), Some("lumen"));
        assert_eq!(card.find_by_class("project-badge")[0].text_content(), "Featured");
        assert_eq!(card.find_by_tag("button")[0].text_content(), "Learn More");

        let image = card.find_by_tag("img")[0];
        assert_eq!(image.attribute("src"), Some("img/lumen.png"));
        assert_eq!(image.attribute("alt"), Some("Lumen App Screenshot"));

        assert_eq!(
            card.find_by_class("project-tagline")[0].text_content(),
            "Notes that glow"
        );
        let feature = card.find_by_class("feature")[0];
        assert_eq!(feature.find_by_class("feature-icon")[0].text_content(), "*");
        assert_eq!(feature.text_content(), "*Offline first");

        let tags: Vec<_> = card
            .find_by_class("tech-tag")
            .iter()
            .map(|tag| tag.text_content())
            .collect();
        assert_eq!(tags, ["Rust", "Wasm"]);
    }

    #[test]
    fn plain_card_omits_optional_sections() {
        let project = &projects(RICH_CATALOG)[1];
        let card = project_card(project);

        assert!(!card.has_class("featured"));
        assert!(card.find_by_class("project-overlay").is_empty());
        assert!(card.find_by_class("project-tagline").is_empty());
        assert!(card.find_by_class("project-features").is_empty());
        assert_eq!(card.find_by_tag("button")[0].text_content(), "View Details");
        assert_eq!(card.find_by_class("project-tech").len(), 1);
        assert!(card.find_by_class("tech-tag").is_empty());
    }

    #[test]
    fn card_construction_is_deterministic() {
        let project = &projects(RICH_CATALOG)[0];
        assert_eq!(project_card(project), project_card(project));
    }

    #[test]
    fn markup_text_is_not_interpreted() {
        let project = &projects(r#"{"projects":[{"id":"x","title":"<b>Bold</b>"}]}"#)[0];
        let card = project_card(project);
        assert!(card.find_by_tag("b").is_empty());
        assert_eq!(card.find_by_class("project-title")[0].text_content(), "<b>Bold</b>");
    }

    #[test]
    fn detail_url_carries_project_id() {
        assert_eq!(
            detail_url("project-template.html", &ProjectId::new("b")),
            "project-template.html?id=b"
        );
    }

    #[test]
    fn detail_url_escapes_query_delimiters() {
        assert_eq!(
            detail_url("project-template.html", &ProjectId::new("a&b #1")),
            "project-template.html?id=a%26b%20%231"
        );
        assert_eq!(
            detail_url("p.html", &ProjectId::new("caf\u{e9}-v2_(beta)")),
            "p.html?id=caf%C3%A9-v2_(beta)"
        );
    }
}
