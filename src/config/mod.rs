//! Run configuration.
//!
//! All settings come from the environment (optionally seeded from a `.env`
//! file by `main`):
//! - [`tenant`] - the seven required `TENANT{1,2}_*` variables per tenant
//! - [`cloud`] - named Azure clouds and their endpoints

mod cloud;
mod tenant;

pub use cloud::{CloudEnvironment, CLOUD_NAMES};
pub use tenant::{normalize_tenant_ids, split_tenant_ids, TenantConfig};

use crate::error::ConfigError;

/// Optional: name of the Azure cloud, defaults to `AZUREPUBLICCLOUD`.
pub const ENV_AZURE_ENVIRONMENT: &str = "AZURE_ENVIRONMENT";
/// Optional: dump ARM requests and responses at debug level.
pub const ENV_LOG_REQUESTS: &str = "PEERING_LOG_REQUESTS";

/// Everything a peering run needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct PeeringConfig {
    pub tenant1: TenantConfig,
    pub tenant2: TenantConfig,
    pub cloud: CloudEnvironment,
    pub log_requests: bool,
}

impl PeeringConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<PeeringConfig, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    ///
    /// Tenant 1 is read completely before tenant 2, so the error names the
    /// first missing variable in that order.
    pub fn from_lookup<F>(lookup: F) -> Result<PeeringConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tenant1 = TenantConfig::from_lookup("TENANT1", &lookup)?;
        let tenant2 = TenantConfig::from_lookup("TENANT2", &lookup)?;

        let cloud = match lookup(ENV_AZURE_ENVIRONMENT) {
            Some(name) if !name.trim().is_empty() => CloudEnvironment::from_name(&name)?,
            _ => CloudEnvironment::default(),
        };

        let log_requests = match lookup(ENV_LOG_REQUESTS) {
            Some(value) => parse_flag(ENV_LOG_REQUESTS, &value)?,
            None => false,
        };

        Ok(PeeringConfig {
            tenant1,
            tenant2,
            cloud,
            log_requests,
        })
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
