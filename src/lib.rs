// cargo watch -x 'fmt' -x 'run'

pub mod azure;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use std::sync::Arc;

use azure::{HttpObserver, RequestLogger, TenantClients};
use config::PeeringConfig;
pub use error::{ApiError, AuthError, ConfigError, ErrorKind, PeeringError};
use processing::TenantSide;
pub use processing::{ensure_bidirectional_peering, PeeringOutcome};

/// Provider name used in request/response dumps.
const REQUEST_LOG_PROVIDER: &str = "AzureRM";

/// Build the clients for both tenants from `config`.
///
/// Tenant 2 always gets its own credential set, even when it carries the
/// same client id and secret as tenant 1.
pub fn build_clients(
    config: &PeeringConfig,
) -> Result<(TenantClients, TenantClients), PeeringError> {
    let observer: Option<Arc<dyn HttpObserver>> = if config.log_requests {
        log::info!("Request logging enabled");
        Some(Arc::new(RequestLogger::new(REQUEST_LOG_PROVIDER)))
    } else {
        None
    };

    let tenant1 = TenantClients::new(&config.tenant1, &config.cloud, observer.clone())?;
    let tenant2 = TenantClients::new(&config.tenant2, &config.cloud, observer)?;
    Ok((tenant1, tenant2))
}

/// Authenticate against both tenants and peer their virtual networks.
pub async fn run(config: &PeeringConfig) -> Result<PeeringOutcome, PeeringError> {
    log::info!("Using Azure environment {}", config.cloud);
    let (tenant1, tenant2) = build_clients(config)?;

    ensure_bidirectional_peering(
        TenantSide {
            config: &config.tenant1,
            vnets: &tenant1.vnets,
            peerings: &tenant1.peerings,
        },
        TenantSide {
            config: &config.tenant2,
            vnets: &tenant2.vnets,
            peerings: &tenant2.peerings,
        },
    )
    .await
}
