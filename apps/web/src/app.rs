use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Document;

use crate::catalog::ProjectStore;
use crate::chrome::PageChrome;
use crate::config::{default_log_level, PortfolioConfig};
use crate::error::{PortfolioError, Result};
use crate::grid::{ProjectGrid, GRID_ROOT_ID};
use crate::modal::{ModalController, ModalElements};
use crate::reveal::ScrollReveal;
use crate::{dom, loader, logging, styles};

thread_local! {
    static MOUNTED: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Everything the page wires up. Owning the listener, observer and frame
/// handles here means dropping the app detaches all of them.
pub struct App {
    store: Rc<ProjectStore>,
    _chrome: PageChrome,
    modal: Option<ModalController>,
    grid: Option<ProjectGrid>,
    _reveal: Option<ScrollReveal>,
}

impl App {
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub const fn modal(&self) -> Option<&ModalController> {
        self.modal.as_ref()
    }

    pub const fn grid(&self) -> Option<&ProjectGrid> {
        self.grid.as_ref()
    }
}

/// Page entry point: wires the page, loads the catalog, renders the grid,
/// then keeps the app mounted for the page's lifetime.
pub async fn start() {
    if let Err(error) = logging::init_logging(default_log_level()) {
        web_sys::console::error_1(&error.into());
    }

    match boot().await {
        Ok(app) => {
            log::info!(
                "event=page_ready status=ok projects={}",
                app.store().len()
            );
            MOUNTED.with(|slot| *slot.borrow_mut() = Some(app));
        }
        Err(error) => log::error!("event=page_boot status=failed error=\"{error}\""),
    }
}

/// Drops the mounted app, detaching every listener. Returns whether an app
/// was mounted.
pub fn unmount() -> bool {
    MOUNTED.with(|slot| slot.borrow_mut().take()).is_some()
}

async fn boot() -> Result<App> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    let config = PortfolioConfig::from_document(&document);
    if let Err(error) = logging::init_logging(&config.log_level) {
        log::warn!("event=logging_level status=fallback error=\"{error}\"");
    }

    if let Err(error) = styles::inject(&document) {
        log::warn!("event=styles_inject status=failed error=\"{error}\"");
    }

    let chrome = PageChrome::wire(&window, &document, &config);

    let empty = Rc::new(ProjectStore::default());
    let modal = match ModalElements::find(&document)
        .and_then(|elements| ModalController::new(&document, elements, Rc::clone(&empty)))
    {
        Ok(modal) => Some(modal),
        Err(error) => {
            log::debug!("event=modal_wire status=skipped error=\"{error}\"");
            None
        }
    };

    let store = match loader::load_catalog(&window, &config.catalog_url).await {
        Ok(catalog) => Rc::new(ProjectStore::from_catalog(catalog)),
        Err(error) => {
            log::error!("event=catalog_load status=failed error=\"{error}\"");
            empty
        }
    };

    let grid = if store.is_empty() {
        None
    } else {
        if let Some(modal) = &modal {
            modal.attach_store(Rc::clone(&store));
        }
        match render_grid(&document, &store, &config) {
            Ok(grid) => Some(grid),
            Err(error) => {
                log::error!("event=grid_render status=failed error=\"{error}\"");
                None
            }
        }
    };

    let reveal = match ScrollReveal::install(&document) {
        Ok(reveal) => Some(reveal),
        Err(error) => {
            log::warn!("event=reveal_install status=failed error=\"{error}\"");
            None
        }
    };

    Ok(App {
        store,
        _chrome: chrome,
        modal,
        grid,
        _reveal: reveal,
    })
}

fn render_grid(
    document: &Document,
    store: &ProjectStore,
    config: &PortfolioConfig,
) -> Result<ProjectGrid> {
    let root = document
        .get_element_by_id(GRID_ROOT_ID)
        .ok_or(PortfolioError::MissingElement("#projectsGrid"))?;
    ProjectGrid::render(document, &root, store.projects(), config)
}
