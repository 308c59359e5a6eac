//! HTTP client and API methods for Cloud Monitoring

use metrics_list_api::{
    CatalogError,
    CatalogResult,
    ListDescriptorsRequest,
};
use reqwest::StatusCode;

use crate::types;

pub(crate) const DEFAULT_API_URL: &str = "https://monitoring.googleapis.com";

/// Cloud Monitoring API client. Requests are issued once; failures are
/// returned to the caller untouched.
pub(crate) struct MonitoringClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl MonitoringClient {
    pub fn new(http_client: reqwest::Client, api_url: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches a single page of metric descriptors
    pub async fn list_metric_descriptors(
        &self, request: &ListDescriptorsRequest, page_token: Option<&str>,
    ) -> CatalogResult<types::ListMetricDescriptorsResponse> {
        let url = descriptors_url(&self.api_url, request, page_token);

        tracing::debug!(
            resource = %request.resource_name(),
            page_token = page_token.unwrap_or(""),
            "Listing metric descriptors"
        );

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            CatalogError::NetworkError(format!("Failed to list metric descriptors: {e}"))
        })?;

        self.handle_response(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self, response: reqwest::Response,
    ) -> CatalogResult<T> {
        let status = response.status();
        let url = response.url().clone();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = error_message(&error_text);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    CatalogError::AuthenticationFailed(format!(
                        "Authentication failed for {}: {}",
                        url.path(),
                        message
                    ))
                }
                StatusCode::NOT_FOUND => {
                    CatalogError::NotFound(format!("{}: {}", url.path(), message))
                }
                _ => CatalogError::ApiError(format!(
                    "Cloud Monitoring API error ({}) for {}: {}",
                    status,
                    url.path(),
                    message
                )),
            });
        }

        response.json().await.map_err(|e| {
            CatalogError::SerializationError(format!("Failed to parse response: {e}"))
        })
    }
}

/// Builds the `metricDescriptors.list` URL for one page of a listing.
pub(crate) fn descriptors_url(
    api_url: &str, request: &ListDescriptorsRequest, page_token: Option<&str>,
) -> String {
    let mut url = format!(
        "{}/v3/{}/metricDescriptors?filter={}",
        api_url,
        request.resource_name(),
        urlencoding::encode(&request.filter)
    );

    if let Some(page_size) = request.page_size {
        url.push_str(&format!("&pageSize={page_size}"));
    }

    if let Some(token) = page_token {
        url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
    }

    url
}

/// Pulls the human-readable message out of a Google API error body, falling
/// back to the raw text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<types::ErrorResponse>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            if parsed.error.status.is_empty() {
                parsed.error.message
            } else {
                format!("{} ({})", parsed.error.message, parsed.error.status)
            }
        }
        _ => body.to_string(),
    }
}
