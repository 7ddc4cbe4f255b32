//! Form configuration read from JSON.
//!
//! ```json
//! {
//!   "fileName": "BoreDM-B17.pdf",
//!   "metrics": { "pagePadding": 24 },
//!   "fields": { "drillingFirm": "BoreDM Drilling", "boringDepth": "25 ft" }
//! }
//! ```
//!
//! Every section is optional.  Missing metrics keep their defaults; a missing `fields` section
//! prints the sample boring log, while a present one replaces it entirely.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::composer::{DocumentComposer, DEFAULT_FILE_NAME};
use crate::error::Result;
use crate::fields::BoringLogFields;
use crate::metrics::FormMetrics;

/// Everything needed to compose one form.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    pub file_name: String,
    pub metrics: FormMetrics,
    pub fields: BoringLogFields,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_owned(),
            metrics: FormMetrics::default(),
            fields: BoringLogFields::sample(),
        }
    }
}

impl FormConfig {
    /// Parses and validates a configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.metrics.validate()?;
        Ok(config)
    }

    /// Reads and validates the configuration file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading form configuration from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Overrides the page padding and returns the updated configuration.
    pub fn with_page_padding(mut self, padding: f64) -> Self {
        self.metrics.page_padding = padding;
        self
    }

    /// Creates a composer for this configuration.
    pub fn composer(&self) -> DocumentComposer {
        DocumentComposer::new(self.metrics.clone(), self.fields.clone())
            .with_file_name(self.file_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let config = FormConfig::from_json_str("{}").expect("valid config");
        assert_eq!(config, FormConfig::default());
        assert_eq!(config.file_name, "BoreDM-B17.pdf");
    }

    #[test]
    fn fields_section_replaces_the_sample() {
        let config =
            FormConfig::from_json_str(r#"{ "fields": { "driller": "JS" } }"#).expect("valid");
        assert_eq!(config.fields.driller.as_deref(), Some("JS"));
        assert!(config.fields.drilling_firm.is_none());
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let err =
            FormConfig::from_json_str(r#"{ "metrics": { "pagePadding": 200 } }"#).unwrap_err();
        assert!(matches!(err, Error::Metrics(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = FormConfig::from_json_str("{ fields: ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn composer_carries_file_name() {
        let mut config = FormConfig::default();
        config.file_name = "B-18.pdf".to_owned();
        assert_eq!(config.composer().compose().file_name(), "B-18.pdf");
    }
}
