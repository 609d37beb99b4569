//! Error types.
//!
//! Errors are split by where they happen so callers (and tests) can tell a
//! bad environment apart from a failed login or a failed ARM call:
//! - [`ConfigError`] - missing or invalid environment variables
//! - [`AuthError`] - credential construction and token acquisition
//! - [`ApiError`] - Azure Resource Manager requests
//! - [`PeeringError`] - anything that aborts a peering run

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be set in the environment")]
    MissingVar { name: String },

    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("unknown Azure environment {name:?} (expected AZUREPUBLICCLOUD, AZURECHINACLOUD or AZUREUSGOVERNMENTCLOUD)")]
    UnknownEnvironment { name: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to acquire token for tenant {tenant_id}: {source}")]
    Token {
        tenant_id: String,
        #[source]
        source: azure_core::Error,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url} returned {status}: {code}: {message}")]
    Status {
        method: String,
        url: String,
        status: u16,
        code: String,
        message: String,
    },

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("error decoding response from {url}: path={path} error={message}")]
    Decode {
        url: String,
        path: String,
        message: String,
    },

    #[error("cannot build resource url from {base}")]
    InvalidUrl { base: String },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// ARM error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl ApiError {
    /// Build a [`ApiError::Status`] from a non-success ARM response.
    ///
    /// Falls back to the raw body when it is not an ARM error envelope.
    pub fn from_response(method: &str, url: &str, status: u16, body: &str) -> ApiError {
        let (code, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => (envelope.error.code, envelope.error.message),
            Err(_) => ("Unknown".to_string(), body.trim().to_string()),
        };
        ApiError::Status {
            method: method.to_string(),
            url: url.to_string(),
            status,
            code,
            message,
        }
    }

    /// HTTP status of the failed call, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Coarse classification of a [`PeeringError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Auth,
    Remote,
}

#[derive(Debug, Error)]
pub enum PeeringError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("authentication setup error: {0}")]
    Auth(#[from] AuthError),

    #[error("{operation} failed: {source}")]
    Api {
        operation: String,
        #[source]
        source: ApiError,
    },

    #[error("virtual network {name} in resource group {resource_group} has no resource id")]
    MissingResourceId {
        resource_group: String,
        name: String,
    },
}

impl PeeringError {
    pub fn api(operation: impl Into<String>, source: ApiError) -> PeeringError {
        PeeringError::Api {
            operation: operation.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PeeringError::Config(_) => ErrorKind::Config,
            PeeringError::Auth(_) => ErrorKind::Auth,
            PeeringError::Api {
                source: ApiError::Auth(_),
                ..
            } => ErrorKind::Auth,
            PeeringError::Api { .. } | PeeringError::MissingResourceId { .. } => ErrorKind::Remote,
        }
    }

    /// The underlying ARM error, if this was a remote call failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            PeeringError::Api { source, .. } => Some(source),
            _ => None,
        }
    }
}
