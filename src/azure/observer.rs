//! Request/response observation for the ARM transport.
//!
//! An [`HttpObserver`] is attached to an [`ArmClient`](super::ArmClient)
//! and sees every attempt it makes. Credentials are never passed in.

use reqwest::{Method, StatusCode, Url};

pub trait HttpObserver: Send + Sync {
    fn on_request(&self, method: &Method, url: &Url, body: Option<&str>);

    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, body: &str);

    fn on_transport_error(&self, _method: &Method, _url: &Url, _error: &reqwest::Error) {}
}

/// Writes request and response dumps to the log at debug level.
pub struct RequestLogger {
    provider: String,
}

impl RequestLogger {
    pub fn new(provider: impl Into<String>) -> RequestLogger {
        RequestLogger {
            provider: provider.into(),
        }
    }
}

impl HttpObserver for RequestLogger {
    fn on_request(&self, method: &Method, url: &Url, body: Option<&str>) {
        log::debug!("{}", format_request(&self.provider, method, url, body));
    }

    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, body: &str) {
        log::debug!(
            "{}",
            format_response(&self.provider, method, url, status, body)
        );
    }

    fn on_transport_error(&self, method: &Method, url: &Url, error: &reqwest::Error) {
        log::debug!(
            "[{}] {method} {url} completed with no response: {error}",
            self.provider
        );
    }
}

pub fn format_request(provider: &str, method: &Method, url: &Url, body: Option<&str>) -> String {
    format!(
        "[{provider}] Request: {method} {url}\n{}",
        body.unwrap_or("<no body>")
    )
}

pub fn format_response(
    provider: &str,
    method: &Method,
    url: &Url,
    status: StatusCode,
    body: &str,
) -> String {
    format!("[{provider}] Response for {method} {url}: {status}\n{body}")
}
