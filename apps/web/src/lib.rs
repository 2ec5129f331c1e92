//! WebAssembly client for the portfolio site.
//!
//! Loads `projects.json`, renders the project grid with its auto-scrolling
//! carousel, drives the project details modal and wires the page's
//! navigation and scroll effects.

pub mod app;
pub mod carousel;
pub mod catalog;
pub mod chrome;
pub mod config;
pub mod dom;
pub mod error;
pub mod grid;
pub mod loader;
pub mod logging;
pub mod markup;
pub mod modal;
pub mod reveal;
pub mod styles;

pub use app::{start, unmount, App};
pub use catalog::{Catalog, Project, ProjectId, ProjectStore};
pub use config::PortfolioConfig;
pub use error::{PortfolioError, Result};
