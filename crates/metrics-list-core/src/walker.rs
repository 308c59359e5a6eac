use futures::{
    Stream,
    TryStreamExt,
};
use metrics_list_api::{
    list_descriptors,
    CatalogResult,
    ListDescriptorsRequest,
    MetricCatalog,
    MetricDescriptor,
};

use crate::aligner::derived_measurements;
use crate::error::GenerateResult;
use crate::output::{
    MetricConfig,
    OutputDocument,
};

/// What to list: the project and the metric type prefix.
#[derive(Debug, Clone, Default)]
pub struct WalkerSettings {
    pub project_id: String,
    pub prefix: String,
    pub page_size: Option<u32>,
}

/// Turns a catalog listing into per-metric configurations.
pub struct CatalogWalker<'a, C: MetricCatalog + ?Sized> {
    catalog: &'a C,
    prefix: String,
    request: ListDescriptorsRequest,
}

impl<'a, C: MetricCatalog + ?Sized> CatalogWalker<'a, C> {
    pub fn new(catalog: &'a C, settings: &WalkerSettings) -> Self {
        let request = ListDescriptorsRequest::for_prefix(&settings.project_id, &settings.prefix)
            .with_page_size(settings.page_size);

        Self {
            catalog,
            prefix: settings.prefix.clone(),
            request,
        }
    }

    pub fn request(&self) -> &ListDescriptorsRequest {
        &self.request
    }

    /// Lazily yields one configuration per descriptor, in catalog order.
    /// Every call starts a new listing.
    pub fn metric_configs(&self) -> impl Stream<Item = CatalogResult<MetricConfig>> + '_ {
        list_descriptors(self.catalog, &self.request)
            .map_ok(move |descriptor| metric_config(descriptor, &self.prefix))
    }

    /// Appends every configuration to `document`, stopping at the first
    /// catalog error. Returns the number of metrics appended.
    pub async fn fill(&self, document: &mut OutputDocument) -> CatalogResult<usize> {
        tracing::info!(
            catalog = self.catalog.catalog_type(),
            resource = %self.request.resource_name(),
            filter = %self.request.filter,
            "Walking metric descriptors"
        );

        let mut configs = std::pin::pin!(self.metric_configs());
        let mut count = 0;

        while let Some(config) = configs.try_next().await? {
            tracing::debug!(
                metric = %config.metric_name,
                kind = %config.kind,
                measurements = config.derived_measurements.len(),
                "Mapped metric"
            );
            document.push(config);
            count += 1;
        }

        tracing::info!(metrics = count, "Finished walking metric descriptors");
        Ok(count)
    }
}

/// Strips `prefix` from the front of `metric_type` (when present) and
/// replaces path separators and dots with underscores.
pub fn base_measurement_name(metric_type: &str, prefix: &str) -> String {
    metric_type
        .strip_prefix(prefix)
        .unwrap_or(metric_type)
        .replace(['/', '.'], "_")
}

pub fn metric_config(descriptor: MetricDescriptor, prefix: &str) -> MetricConfig {
    let base_name = base_measurement_name(&descriptor.metric_type, prefix);

    MetricConfig {
        derived_measurements: derived_measurements(
            descriptor.metric_kind,
            descriptor.value_type,
            &base_name,
        ),
        metric_name: descriptor.metric_type,
        kind: descriptor.metric_kind,
        filters: Vec::new(),
        labels: descriptor.labels,
    }
}

/// Walks the catalog into `document` and hands it back once the listing is
/// exhausted.
pub async fn generate<C: MetricCatalog + ?Sized>(
    catalog: &C, settings: &WalkerSettings, mut document: OutputDocument,
) -> GenerateResult<OutputDocument> {
    CatalogWalker::new(catalog, settings)
        .fill(&mut document)
        .await?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use metrics_list_api::{
        CatalogError,
        DescriptorPage,
        LabelDescriptor,
        MetricKind,
        ValueType,
    };

    use super::*;
    use crate::error::GenerateError;
    use crate::output::DEFAULT_INDENT;

    struct FakeCatalog {
        pages: Vec<Vec<MetricDescriptor>>,
        fail_on_page: Option<usize>,
        requests: Mutex<Vec<ListDescriptorsRequest>>,
    }

    impl FakeCatalog {
        fn new(pages: Vec<Vec<MetricDescriptor>>) -> Self {
            Self {
                pages,
                fail_on_page: None,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MetricCatalog for FakeCatalog {
        fn catalog_type(&self) -> &str {
            "fake"
        }

        async fn list_descriptors_page(
            &self, request: &ListDescriptorsRequest, page_token: Option<&str>,
        ) -> CatalogResult<DescriptorPage> {
            self.requests.lock().unwrap().push(request.clone());

            let index = page_token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
            if self.fail_on_page == Some(index) {
                return Err(CatalogError::AuthenticationFailed(
                    "token expired".to_string(),
                ));
            }

            Ok(DescriptorPage {
                descriptors: self.pages.get(index).cloned().unwrap_or_default(),
                next_page_token: (index + 1 < self.pages.len()).then(|| (index + 1).to_string()),
            })
        }
    }

    fn descriptor(metric_type: &str, kind: MetricKind, value_type: ValueType) -> MetricDescriptor {
        MetricDescriptor {
            metric_type: metric_type.to_string(),
            metric_kind: kind,
            value_type,
            ..Default::default()
        }
    }

    fn settings(prefix: &str) -> WalkerSettings {
        WalkerSettings {
            project_id: "my-project".to_string(),
            prefix: prefix.to_string(),
            page_size: None,
        }
    }

    #[test]
    fn test_base_measurement_name() {
        assert_eq!(
            base_measurement_name("custom.googleapis.com/foo.bar/baz", "custom.googleapis.com/"),
            "foo_bar_baz"
        );
    }

    #[test]
    fn test_base_measurement_name_without_matching_prefix() {
        assert_eq!(
            base_measurement_name("agent.googleapis.com/cpu/usage", "custom.googleapis.com/"),
            "agent_googleapis_com_cpu_usage"
        );
        assert_eq!(base_measurement_name("a.b/c", ""), "a_b_c");
    }

    #[test]
    fn test_base_measurement_name_strips_prefix_once() {
        assert_eq!(base_measurement_name("x/x/y", "x/"), "x_y");
    }

    #[test]
    fn test_metric_config_copies_labels() {
        let mut input = descriptor(
            "custom.googleapis.com/jobs/healthy",
            MetricKind::Gauge,
            ValueType::Bool,
        );
        input.labels = vec![
            LabelDescriptor {
                key: "job".to_string(),
                description: "Job name".to_string(),
            },
            LabelDescriptor {
                key: "zone".to_string(),
                description: String::new(),
            },
        ];

        let config = metric_config(input.clone(), "custom.googleapis.com/");

        assert_eq!(config.labels, input.labels);
        assert!(config.filters.is_empty());
        assert_eq!(
            config.derived_measurements[0].measurement,
            "jobs_healthy_true_count"
        );
    }

    #[test]
    fn test_raw_alignment_may_share_base_name() {
        let config = metric_config(
            descriptor("custom.googleapis.com/queue", MetricKind::Delta, ValueType::Int64),
            "custom.googleapis.com/",
        );

        let names: Vec<&str> = config
            .derived_measurements
            .iter()
            .map(|m| m.measurement.as_str())
            .collect();
        assert!(names.contains(&"queue"));
        assert!(names.contains(&"queue_rate"));
    }

    #[tokio::test]
    async fn test_end_to_end_gauge_int64() {
        let catalog = FakeCatalog::new(vec![vec![descriptor(
            "custom.googleapis.com/requests",
            MetricKind::Gauge,
            ValueType::Int64,
        )]]);

        let document = generate(
            &catalog,
            &settings("custom.googleapis.com/"),
            OutputDocument::new("my-project"),
        )
        .await
        .unwrap();

        assert_eq!(document.len(), 1);
        let metric = &document.metrics[0];
        assert_eq!(metric.metric_name, "custom.googleapis.com/requests");
        assert_eq!(metric.kind.as_str(), "GAUGE");
        let names: Vec<&str> = metric
            .derived_measurements
            .iter()
            .map(|m| m.measurement.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "requests_min",
                "requests_max",
                "requests_mean",
                "requests_count",
                "requests_sum",
                "requests_stddev",
                "requests",
            ]
        );
    }

    #[tokio::test]
    async fn test_preserves_catalog_order_across_pages() {
        let catalog = FakeCatalog::new(vec![
            vec![
                descriptor("p/zeta", MetricKind::Gauge, ValueType::Double),
                descriptor("p/alpha", MetricKind::Cumulative, ValueType::Int64),
            ],
            vec![descriptor("p/alpha", MetricKind::Cumulative, ValueType::Int64)],
        ]);

        let document = generate(&catalog, &settings("p/"), OutputDocument::new("my-project"))
            .await
            .unwrap();

        let metrics: Vec<&str> = document
            .metrics
            .iter()
            .map(|m| m.metric_name.as_str())
            .collect();
        assert_eq!(metrics, vec!["p/zeta", "p/alpha", "p/alpha"]);
        assert!(document.metrics[1].derived_measurements.is_empty());
    }

    #[tokio::test]
    async fn test_request_carries_prefix_filter_and_page_size() {
        let catalog = FakeCatalog::new(vec![vec![]]);
        let mut walker_settings = settings("custom.googleapis.com/");
        walker_settings.page_size = Some(250);

        let walker = CatalogWalker::new(&catalog, &walker_settings);
        let mut document = OutputDocument::new("my-project");
        assert_eq!(walker.fill(&mut document).await.unwrap(), 0);

        let requests = catalog.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].resource_name(), "projects/my-project");
        assert_eq!(
            requests[0].filter,
            r#"metric.type = starts_with("custom.googleapis.com/")"#
        );
        assert_eq!(requests[0].page_size, Some(250));
    }

    #[tokio::test]
    async fn test_catalog_error_aborts_walk() {
        let mut catalog = FakeCatalog::new(vec![
            vec![descriptor("p/a", MetricKind::Gauge, ValueType::Int64)],
            vec![descriptor("p/b", MetricKind::Gauge, ValueType::Int64)],
        ]);
        catalog.fail_on_page = Some(1);

        let result = generate(&catalog, &settings("p/"), OutputDocument::new("my-project")).await;

        assert!(matches!(
            result,
            Err(GenerateError::Catalog(CatalogError::AuthenticationFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_generation_is_byte_identical_across_runs() {
        let catalog = FakeCatalog::new(vec![vec![
            descriptor("p/a", MetricKind::Delta, ValueType::Distribution),
            descriptor("p/b", MetricKind::Gauge, ValueType::Bool),
            descriptor("p/c", MetricKind::Delta, ValueType::Double),
        ]]);

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let document = generate(&catalog, &settings("p/"), OutputDocument::new("my-project"))
                .await
                .unwrap();
            outputs.push(document.to_json_pretty(DEFAULT_INDENT).unwrap());
        }

        assert_eq!(outputs[0], outputs[1]);
    }
}
