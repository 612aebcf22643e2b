//! Shared Face API connection
//!
//! Holds the pooled HTTP client, base endpoint and subscription key used by
//! the detection, identification and person directory clients.

use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::ProviderError;

/// Face API version prefix appended to the configured endpoint
const API_PATH: &str = "face/v1.0";

/// Header carrying the subscription key
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

const USER_AGENT: &str = concat!("facewho-id/", env!("CARGO_PKG_VERSION"));

/// Connection to one Face API resource
pub struct FaceApiConnection {
    http_client: Client,
    endpoint: String,
    subscription_key: String,
}

impl FaceApiConnection {
    /// Create a connection
    ///
    /// `endpoint` is the resource base URL without the API path, e.g.
    /// `https://westus.api.cognitive.microsoft.com`.
    pub fn new(
        endpoint: impl Into<String>,
        subscription_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            subscription_key: subscription_key.into(),
        })
    }

    /// Full URL for an API path such as `detect`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.endpoint, API_PATH, path)
    }

    /// Start a request with the subscription key attached
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, self.url(path))
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .header(header::ACCEPT, "application/json")
    }

    /// Send a request and decode a JSON success body
    ///
    /// Non-success statuses become `ProviderError::Status` with the provider's
    /// error body kept for diagnostics.
    pub(crate) async fn send_json<T>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "Face API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
