use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    #[default]
    #[serde(rename = "METRIC_KIND_UNSPECIFIED")]
    Unspecified,
    Gauge,
    Delta,
    Cumulative,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Unspecified,
        MetricKind::Gauge,
        MetricKind::Delta,
        MetricKind::Cumulative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "METRIC_KIND_UNSPECIFIED",
            Self::Gauge => "GAUGE",
            Self::Delta => "DELTA",
            Self::Cumulative => "CUMULATIVE",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown metric kind: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    #[default]
    #[serde(rename = "VALUE_TYPE_UNSPECIFIED")]
    Unspecified,
    Bool,
    Int64,
    Double,
    String,
    Distribution,
    Money,
}

impl ValueType {
    pub const ALL: [ValueType; 7] = [
        ValueType::Unspecified,
        ValueType::Bool,
        ValueType::Int64,
        ValueType::Double,
        ValueType::String,
        ValueType::Distribution,
        ValueType::Money,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "VALUE_TYPE_UNSPECIFIED",
            Self::Bool => "BOOL",
            Self::Int64 => "INT64",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Distribution => "DISTRIBUTION",
            Self::Money => "MONEY",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64 | Self::Double)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|value_type| value_type.as_str() == s)
            .ok_or_else(|| format!("Unknown value type: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDescriptor {
    pub key: String,
    #[serde(default)]
    pub description: String,
}

/// Catalog metadata for a single metric.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Resource name, e.g. `projects/p/metricDescriptors/custom.googleapis.com/x`
    pub name: String,
    /// Fully qualified metric type, e.g. `custom.googleapis.com/x`
    #[serde(rename = "type")]
    pub metric_type: String,
    pub metric_kind: MetricKind,
    pub value_type: ValueType,
    #[serde(default)]
    pub labels: Vec<LabelDescriptor>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDescriptorsRequest {
    pub project_id: String,
    pub filter: String,
    pub page_size: Option<u32>,
}

impl ListDescriptorsRequest {
    /// Builds a request for every descriptor whose type starts with `prefix`.
    pub fn for_prefix(project_id: impl Into<String>, prefix: &str) -> Self {
        Self {
            project_id: project_id.into(),
            filter: prefix_filter(prefix),
            page_size: None,
        }
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// The parent resource the listing runs against.
    pub fn resource_name(&self) -> String {
        format!("projects/{}", self.project_id)
    }
}

pub fn prefix_filter(prefix: &str) -> String {
    format!("metric.type = starts_with(\"{prefix}\")")
}

/// One page of a descriptor listing.
#[derive(Debug, Clone, Default)]
pub struct DescriptorPage {
    pub descriptors: Vec<MetricDescriptor>,
    /// Token for the following page; `None` once the listing is exhausted.
    pub next_page_token: Option<String>,
}
