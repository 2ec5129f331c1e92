use serde::Deserialize;
use web_sys::Document;

use crate::error::{PortfolioError, Result};

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// Page-level settings. Every field has a default, so the override block
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioConfig {
    pub catalog_url: String,
    pub detail_page: String,
    pub log_level: String,
    /// Pixels subtracted from an anchor target's offset for the fixed header.
    pub header_offset: f64,
    pub navbar_threshold: f64,
    pub scroll_spy_offset: f64,
    pub parallax_limit: f64,
    pub parallax_rate: f64,
    pub ripple_duration_ms: u32,
    /// Pixels advanced per animation frame by the carousel.
    pub scroll_step: f64,
    pub scroll_resume_ms: f64,
    pub pointer_resume_ms: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            catalog_url: "projects.json".to_string(),
            detail_page: "project-template.html".to_string(),
            log_level: default_log_level().to_string(),
            header_offset: 80.0,
            navbar_threshold: 100.0,
            scroll_spy_offset: 100.0,
            parallax_limit: 600.0,
            parallax_rate: 0.3,
            ripple_duration_ms: 600,
            scroll_step: 1.0,
            scroll_resume_ms: 3000.0,
            pointer_resume_ms: 1000.0,
        }
    }
}

impl PortfolioConfig {
    /// # Errors
    /// Malformed JSON, wrong field types, or a `scrollStep` that is not a
    /// positive number of pixels.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if !(config.scroll_step.is_finite() && config.scroll_step > 0.0) {
            let error = <serde_json::Error as serde::de::Error>::custom(format!(
                "scrollStep must be a positive number of pixels, got {}",
                config.scroll_step
            ));
            return Err(PortfolioError::Config(error));
        }
        Ok(config)
    }

    /// Reads the override block from the page, falling back to defaults
    /// when it is absent or malformed.
    pub fn from_document(document: &Document) -> Self {
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let text = element.text_content().unwrap_or_default();
        if text.trim().is_empty() {
            return Self::default();
        }

        match Self::from_json(&text) {
            Ok(config) => config,
            Err(error) => {
                log::warn!("event=config_load status=fallback error=\"{error}\"");
                Self::default()
            }
        }
    }
}

/// `debug` for debug builds, `info` for release builds.
pub const fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::PortfolioConfig;

    #[test]
    fn empty_object_yields_defaults() {
        let config = PortfolioConfig::from_json("{}").unwrap();
        assert_eq!(config, PortfolioConfig::default());
        assert_eq!(config.catalog_url, "projects.json");
        assert_eq!(config.detail_page, "project-template.html");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            PortfolioConfig::from_json(r#"{"catalogUrl": "data/work.json", "scrollStep": 2.5}"#)
                .unwrap();
        assert_eq!(config.catalog_url, "data/work.json");
        assert!((config.scroll_step - 2.5).abs() < f64::EPSILON);
        assert!((config.scroll_resume_ms - 3000.0).abs() < f64::EPSILON);
        assert_eq!(config.ripple_duration_ms, 600);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(PortfolioConfig::from_json("{catalogUrl:").is_err());
    }

    #[test]
    fn fractional_step_is_accepted() {
        let config = PortfolioConfig::from_json(r#"{"scrollStep": 0.5}"#).unwrap();
        assert!((config.scroll_step - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        for json in [r#"{"scrollStep": 0}"#, r#"{"scrollStep": -2}"#] {
            let error = PortfolioConfig::from_json(json).unwrap_err();
            assert!(error.to_string().contains("scrollStep"));
        }
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        assert!(PortfolioConfig::from_json(r#"{"headerOffset": "eighty"}"#).is_err());
    }
}
