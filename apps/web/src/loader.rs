use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

use crate::catalog::Catalog;
use crate::error::{js_message, PortfolioError, Result};

/// Fetches and decodes the project catalog. One attempt, no retry.
pub async fn load_catalog(window: &Window, url: &str) -> Result<Catalog> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|error| request_error(url, &error))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|error| request_error(url, &error))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| PortfolioError::Body("fetch did not resolve to a Response".to_string()))?;

    if !response.ok() {
        return Err(PortfolioError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = response.json().map_err(|error| body_error(&error))?;
    let json = JsFuture::from(body).await.map_err(|error| body_error(&error))?;

    let catalog: Catalog = serde_wasm_bindgen::from_value(json)?;
    log::debug!(
        "event=catalog_fetch status=ok url={url} projects={}",
        catalog.projects.len()
    );
    Ok(catalog)
}

fn request_error(url: &str, error: &JsValue) -> PortfolioError {
    PortfolioError::Request {
        url: url.to_string(),
        message: js_message(error),
    }
}

fn body_error(error: &JsValue) -> PortfolioError {
    PortfolioError::Body(js_message(error))
}
