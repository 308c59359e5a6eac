use std::time::Duration;

use metrics_list_api::{
    CatalogError,
    CatalogResult,
};
use reqwest::header::{
    HeaderMap,
    HeaderValue,
    AUTHORIZATION,
};
use secrecy::{
    ExposeSecret,
    SecretString,
};

use crate::client::DEFAULT_API_URL;

/// Connection settings for the Cloud Monitoring backend.
#[derive(Debug)]
pub struct MonitoringSettings {
    pub endpoint: String,
    /// OAuth2 bearer token. Requests go out unauthenticated when unset.
    pub access_token: Option<SecretString>,
    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_URL.to_string(),
            access_token: None,
            timeout: None,
        }
    }
}

pub(crate) fn auth_headers(access_token: Option<&SecretString>) -> CatalogResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(token) = access_token {
        let token = token.expose_secret();
        if !token.is_empty() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                CatalogError::InvalidConfig(format!("Invalid access token format: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
    }

    Ok(headers)
}

pub(crate) fn build_http_client(settings: &MonitoringSettings) -> CatalogResult<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().default_headers(auth_headers(settings.access_token.as_ref())?);

    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| CatalogError::Internal(format!("Failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_headers_with_token() {
        let token = SecretString::from("ya29.token");
        let headers = auth_headers(Some(&token)).unwrap();

        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer ya29.token");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_auth_headers_without_token() {
        assert!(auth_headers(None).unwrap().is_empty());
        assert!(auth_headers(Some(&SecretString::from("")))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_auth_headers_rejects_invalid_token() {
        let token = SecretString::from("bad\ntoken");
        assert!(matches!(
            auth_headers(Some(&token)),
            Err(CatalogError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_default_settings() {
        let settings = MonitoringSettings::default();
        assert_eq!(settings.endpoint, "https://monitoring.googleapis.com");
        assert!(settings.access_token.is_none());
        assert!(settings.timeout.is_none());
    }
}
