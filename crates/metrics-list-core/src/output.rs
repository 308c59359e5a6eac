use std::io::Write;

use metrics_list_api::{
    LabelDescriptor,
    MetricKind,
};
use serde::Serialize;

use crate::aligner::DerivedMeasurement;
use crate::error::GenerateResult;

pub const DEFAULT_INDENT: usize = 4;

/// Aggregation configuration for one catalog metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricConfig {
    #[serde(rename = "metric")]
    pub metric_name: String,
    pub kind: MetricKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    #[serde(rename = "config")]
    pub derived_measurements: Vec<DerivedMeasurement>,
    #[serde(rename = "label")]
    pub labels: Vec<LabelDescriptor>,
}

/// Root of the generated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputDocument {
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    #[serde(rename = "measurements", skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricConfig>,
}

impl OutputDocument {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    pub fn with_period_minutes(mut self, period_minutes: Option<u32>) -> Self {
        self.period_minutes = period_minutes;
        self
    }

    pub fn with_filters(mut self, filters: Vec<String>) -> Self {
        self.filters = filters;
        self
    }

    pub fn push(&mut self, metric: MetricConfig) {
        self.metrics.push(metric);
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Serializes the document as indented JSON with keys in declaration
    /// order.
    pub fn to_json_pretty(&self, indent: usize) -> GenerateResult<String> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer, indent)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Writes the document followed by a trailing newline.
    pub fn write_json<W: Write>(&self, mut writer: W, indent: usize) -> GenerateResult<()> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);

        self.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
