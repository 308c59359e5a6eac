//! API response types for the Cloud Monitoring v3 API
//!
//! These types are internal implementation details for deserializing
//! Cloud Monitoring responses. Enum-valued fields stay as strings here and
//! are resolved in `mapper`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListMetricDescriptorsResponse {
    #[serde(default)]
    pub metric_descriptors: Vec<MetricDescriptor>,
    #[serde(default)]
    pub next_page_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: String,
    #[serde(default)]
    pub labels: Vec<LabelDescriptor>,
    #[serde(default)]
    pub metric_kind: String,
    #[serde(default)]
    pub value_type: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LabelDescriptor {
    pub key: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub value_type: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorStatus {
    #[serde(default)]
    #[allow(dead_code)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
