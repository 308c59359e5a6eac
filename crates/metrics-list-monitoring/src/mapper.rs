use metrics_list_api::{
    DescriptorPage,
    LabelDescriptor,
    MetricDescriptor,
    MetricKind,
    ValueType,
};

use crate::types;

pub(crate) fn map_metric_kind(kind: &str) -> MetricKind {
    match kind {
        "GAUGE" => MetricKind::Gauge,
        "DELTA" => MetricKind::Delta,
        "CUMULATIVE" => MetricKind::Cumulative,
        _ => MetricKind::Unspecified,
    }
}

pub(crate) fn map_value_type(value_type: &str) -> ValueType {
    match value_type {
        "BOOL" => ValueType::Bool,
        "INT64" => ValueType::Int64,
        "DOUBLE" => ValueType::Double,
        "STRING" => ValueType::String,
        "DISTRIBUTION" => ValueType::Distribution,
        "MONEY" => ValueType::Money,
        _ => ValueType::Unspecified,
    }
}

pub(crate) fn map_descriptor(descriptor: types::MetricDescriptor) -> MetricDescriptor {
    MetricDescriptor {
        name: descriptor.name,
        metric_type: descriptor.metric_type,
        metric_kind: map_metric_kind(&descriptor.metric_kind),
        value_type: map_value_type(&descriptor.value_type),
        labels: descriptor
            .labels
            .into_iter()
            .map(|label| LabelDescriptor {
                key: label.key,
                description: label.description,
            })
            .collect(),
        unit: descriptor.unit,
        description: descriptor.description,
        display_name: descriptor.display_name,
    }
}

pub(crate) fn map_page(response: types::ListMetricDescriptorsResponse) -> DescriptorPage {
    let next_page_token = if response.next_page_token.is_empty() {
        None
    } else {
        Some(response.next_page_token)
    };

    DescriptorPage {
        descriptors: response
            .metric_descriptors
            .into_iter()
            .map(map_descriptor)
            .collect(),
        next_page_token,
    }
}
