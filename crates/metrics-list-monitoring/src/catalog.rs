//! Cloud Monitoring catalog implementation

use async_trait::async_trait;
use metrics_list_api::{
    CatalogResult,
    DescriptorPage,
    ListDescriptorsRequest,
    MetricCatalog,
};

use crate::{
    client,
    config,
    mapper,
};

/// Lists metric descriptors through the Cloud Monitoring v3 REST API
pub struct MonitoringCatalog {
    client: client::MonitoringClient,
}

impl MonitoringCatalog {
    pub fn new(settings: &config::MonitoringSettings) -> CatalogResult<Self> {
        let http_client = config::build_http_client(settings)?;

        tracing::debug!(endpoint = %settings.endpoint, "Created Cloud Monitoring catalog");

        Ok(Self {
            client: client::MonitoringClient::new(http_client, &settings.endpoint),
        })
    }
}

#[async_trait]
impl MetricCatalog for MonitoringCatalog {
    fn catalog_type(&self) -> &str {
        "cloud-monitoring"
    }

    async fn list_descriptors_page(
        &self, request: &ListDescriptorsRequest, page_token: Option<&str>,
    ) -> CatalogResult<DescriptorPage> {
        let response = self
            .client
            .list_metric_descriptors(request, page_token)
            .await?;

        Ok(mapper::map_page(response))
    }
}
