use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, PortfolioError>;

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("request for {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("failed to decode catalog: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("required element `{0}` not found")]
    MissingElement(&'static str),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<serde_wasm_bindgen::Error> for PortfolioError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

/// Best-effort message for a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

impl From<JsValue> for PortfolioError {
    fn from(value: JsValue) -> Self {
        Self::Dom(js_message(&value))
    }
}
