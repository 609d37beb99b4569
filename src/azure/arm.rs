//! Azure Resource Manager JSON transport.
//!
//! [`ArmClient`] sends authenticated GET/PUT requests for resources in one
//! subscription and decodes the JSON responses.

use super::auth::TokenSource;
use super::observer::HttpObserver;
use crate::error::ApiError;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Network API version used for all requests.
pub const NETWORK_API_VERSION: &str = "2019-11-01";

/// Header carrying bearer tokens for auxiliary tenants.
pub const AUXILIARY_AUTH_HEADER: &str = "x-ms-authorization-auxiliary";

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

pub struct ArmClient {
    http: reqwest::Client,
    base_url: Url,
    subscription_id: String,
    api_version: String,
    tokens: Arc<dyn TokenSource>,
    retry_attempts: u32,
    retry_delay: Duration,
    observer: Option<Arc<dyn HttpObserver>>,
}

impl ArmClient {
    /// Client for `subscription_id` under the Resource Manager `base_url`.
    ///
    /// Starts with no retries, no observer and [`NETWORK_API_VERSION`].
    pub fn new(base_url: Url, subscription_id: &str, tokens: Arc<dyn TokenSource>) -> ArmClient {
        ArmClient {
            http: reqwest::Client::new(),
            base_url,
            subscription_id: subscription_id.to_string(),
            api_version: NETWORK_API_VERSION.to_string(),
            tokens,
            retry_attempts: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
            observer: None,
        }
    }

    /// Number of extra attempts after a retryable failure.
    pub fn with_retry_attempts(mut self, retry_attempts: u32) -> ArmClient {
        self.retry_attempts = retry_attempts;
        self
    }

    /// Wait between attempts when the server sends no `Retry-After`.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> ArmClient {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_api_version(mut self, api_version: &str) -> ArmClient {
        self.api_version = api_version.to_string();
        self
    }

    pub fn with_observer(mut self, observer: Option<Arc<dyn HttpObserver>>) -> ArmClient {
        self.observer = observer;
        self
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    /// URL of a resource group scoped resource:
    /// `/subscriptions/{sub}/resourceGroups/{rg}/providers/{segments...}`.
    ///
    /// Every segment is percent-encoded.
    pub fn resource_url(
        &self,
        resource_group: &str,
        provider_path: &[&str],
    ) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                base: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend([
                "subscriptions",
                self.subscription_id.as_str(),
                "resourceGroups",
                resource_group,
                "providers",
            ])
            .extend(provider_path);
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let body = self.send(Method::GET, &url, None).await?;
        decode(&url, &body)
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        payload: &B,
    ) -> Result<T, ApiError> {
        let json = serde_json::to_string(payload).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            path: ".".to_string(),
            message: format!("cannot serialize request: {e}"),
        })?;
        let body = self.send(Method::PUT, &url, Some(json)).await?;
        decode(&url, &body)
    }

    /// Send one request, retrying up to `retry_attempts` times.
    ///
    /// Returns the response body of the first successful attempt.
    async fn send(
        &self,
        method: Method,
        url: &Url,
        body: Option<String>,
    ) -> Result<String, ApiError> {
        let mut attempt: u32 = 0;
        loop {
            let primary = self.tokens.primary_token().await?;
            let auxiliary = self.tokens.auxiliary_tokens().await?;

            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .bearer_auth(&primary)
                .header(ACCEPT, "application/json");
            if let Some(value) = auxiliary_header_value(&auxiliary) {
                request = request.header(AUXILIARY_AUTH_HEADER, value);
            }
            if let Some(body) = &body {
                request = request
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            if let Some(observer) = &self.observer {
                observer.on_request(&method, url, body.as_deref());
            }
            log::debug!("{method} {url} attempt={attempt}");

            let wait = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let server_wait = retry_after(response.headers());
                    let text = response.text().await.map_err(|source| ApiError::Transport {
                        method: method.to_string(),
                        url: url.to_string(),
                        source,
                    })?;
                    if let Some(observer) = &self.observer {
                        observer.on_response(&method, url, status, &text);
                    }

                    if status.is_success() {
                        return Ok(text);
                    }
                    if attempt >= self.retry_attempts || !is_retryable_status(status) {
                        return Err(ApiError::from_response(
                            method.as_str(),
                            url.as_str(),
                            status.as_u16(),
                            &text,
                        ));
                    }
                    log::warn!("{method} {url} returned {status}, retrying");
                    server_wait.unwrap_or(self.retry_delay)
                }
                Err(source) => {
                    if let Some(observer) = &self.observer {
                        observer.on_transport_error(&method, url, &source);
                    }
                    let retryable = source.is_connect() || source.is_timeout();
                    if attempt >= self.retry_attempts || !retryable {
                        return Err(ApiError::Transport {
                            method: method.to_string(),
                            url: url.to_string(),
                            source,
                        });
                    }
                    log::warn!("{method} {url} failed: {source}, retrying");
                    self.retry_delay
                }
            };

            tokio::time::sleep(wait).await;
            attempt += 1;
        }
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ApiError> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("RESPONSE START:\n\n{body}\n\nRESPONSE END\n");
        ApiError::Decode {
            url: url.to_string(),
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })
}

/// `Bearer a, Bearer b` for the auxiliary tenants, `None` when there are none.
pub fn auxiliary_header_value(tokens: &[String]) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }
    Some(
        tokens
            .iter()
            .map(|t| format!("Bearer {t}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Throttling, timeouts and server side failures.
pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
}

/// Numeric `Retry-After` seconds, capped.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let seconds: u64 = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    Some(Duration::from_secs(seconds).min(MAX_RETRY_AFTER))
}
