//! Per-tenant client construction.

use super::arm::ArmClient;
use super::auth::{checked_endpoint, MultiTenantServicePrincipal, TokenSource};
use super::network::{VirtualNetworkPeeringsClient, VirtualNetworksClient};
use super::observer::HttpObserver;
use crate::config::{CloudEnvironment, TenantConfig};
use crate::error::AuthError;
use std::sync::Arc;

/// Retry attempts configured on the peering client.
pub const PEERING_RETRY_ATTEMPTS: u32 = 1;

/// The two clients used on one side of the peering.
pub struct TenantClients {
    pub vnets: VirtualNetworksClient,
    pub peerings: VirtualNetworkPeeringsClient,
}

impl TenantClients {
    /// Build both clients for `tenant`, each with its own credential.
    pub fn new(
        tenant: &TenantConfig,
        cloud: &CloudEnvironment,
        observer: Option<Arc<dyn HttpObserver>>,
    ) -> Result<TenantClients, AuthError> {
        let base_url = checked_endpoint(&cloud.resource_manager_endpoint)?;

        let vnet_tokens: Arc<dyn TokenSource> =
            Arc::new(MultiTenantServicePrincipal::new(tenant, cloud)?);
        let peering_tokens: Arc<dyn TokenSource> =
            Arc::new(MultiTenantServicePrincipal::new(tenant, cloud)?);

        log::debug!(
            "built clients for {} in subscription {}",
            tenant.label,
            tenant.subscription_id
        );

        Ok(TenantClients {
            vnets: VirtualNetworksClient::new(
                ArmClient::new(base_url.clone(), &tenant.subscription_id, vnet_tokens)
                    .with_observer(observer.clone()),
            ),
            peerings: VirtualNetworkPeeringsClient::new(
                ArmClient::new(base_url, &tenant.subscription_id, peering_tokens)
                    .with_retry_attempts(PEERING_RETRY_ATTEMPTS)
                    .with_observer(observer),
            ),
        })
    }
}
