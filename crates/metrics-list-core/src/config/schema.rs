use std::time::Duration;

use metrics_list_monitoring::MonitoringSettings;
use secrecy::{
    ExposeSecret,
    SecretString,
};
use serde::{
    Deserialize,
    Deserializer,
};

use super::interpolation::{
    interpolate,
    InterpolationResult,
};
use crate::output::{
    OutputDocument,
    DEFAULT_INDENT,
};

pub(super) const DEFAULT_ENDPOINT: &str = "https://monitoring.googleapis.com";

/// Token source used when the config file does not set one.
pub(super) const DEFAULT_ACCESS_TOKEN: &str = "${GOOGLE_OAUTH_ACCESS_TOKEN:-}";

pub(super) const MAX_PAGE_SIZE: u32 = 10_000;

pub(super) const MAX_INDENT: usize = 16;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MetricsListConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub access_token: Option<SecretString>,

    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_token: None,
            page_size: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub period_minutes: Option<u32>,

    #[serde(default)]
    pub filters: Vec<String>,

    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            period_minutes: None,
            filters: Vec::new(),
            indent: default_indent(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(SecretString::from))
}

impl MetricsListConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.catalog.endpoint.trim().is_empty() {
            errors.push("catalog.endpoint must not be empty".to_string());
        }

        if let Some(page_size) = self.catalog.page_size {
            if page_size == 0 || page_size > MAX_PAGE_SIZE {
                errors.push(format!(
                    "catalog.page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
                ));
            }
        }

        if self.catalog.timeout_secs == Some(0) {
            errors.push("catalog.timeout_secs must be greater than 0".to_string());
        }

        if self.output.indent > MAX_INDENT {
            errors.push(format!(
                "output.indent must be at most {MAX_INDENT}, got {}",
                self.output.indent
            ));
        }

        errors
    }

    /// Connection settings for the catalog backend. Falls back to
    /// `GOOGLE_OAUTH_ACCESS_TOKEN` when no token is configured.
    pub fn monitoring_settings(&self) -> InterpolationResult<MonitoringSettings> {
        let access_token = match &self.catalog.access_token {
            Some(token) => Some(SecretString::from(token.expose_secret())),
            None => {
                let token = interpolate(DEFAULT_ACCESS_TOKEN)?;
                (!token.is_empty()).then(|| SecretString::from(token))
            }
        };

        Ok(MonitoringSettings {
            endpoint: self.catalog.endpoint.clone(),
            access_token,
            timeout: self.catalog.timeout_secs.map(Duration::from_secs),
        })
    }

    /// An empty document for `project_id` carrying the configured
    /// document-level fields.
    pub fn output_document(&self, project_id: &str) -> OutputDocument {
        OutputDocument::new(project_id)
            .with_period_minutes(self.output.period_minutes)
            .with_filters(self.output.filters.clone())
    }
}
