//! Bidirectional peering between the networks of two tenants.

use crate::azure::{VirtualNetworkPeerings, VirtualNetworks};
use crate::config::TenantConfig;
use crate::error::PeeringError;
use crate::models::{build_peering, VirtualNetwork, VirtualNetworkPeering};

/// One side of the peering: where its network lives and how to reach it.
pub struct TenantSide<'a> {
    pub config: &'a TenantConfig,
    pub vnets: &'a dyn VirtualNetworks,
    pub peerings: &'a dyn VirtualNetworkPeerings,
}

/// What the run looked up and created.
#[derive(Debug, Clone)]
pub struct PeeringOutcome {
    pub tenant1_vnet: VirtualNetwork,
    pub tenant2_vnet: VirtualNetwork,
    /// Peering created on tenant 2's network, pointing at tenant 1.
    pub on_tenant2: VirtualNetworkPeering,
    /// Peering created on tenant 1's network, pointing at tenant 2.
    pub on_tenant1: VirtualNetworkPeering,
}

/// Peering names as `(on tenant 2's network, on tenant 1's network)`.
///
/// The peering on tenant 2 is named after tenant 1's virtual network, the
/// one on tenant 1 after tenant 2's resource group.
pub fn peering_names(tenant1: &TenantConfig, tenant2: &TenantConfig) -> (String, String) {
    (
        tenant1.virtual_network.clone(),
        tenant2.resource_group.clone(),
    )
}

/// Look up both networks, then create or update a peering on each side.
///
/// Stops at the first error: no peering is touched unless both networks
/// resolved, and the tenant 1 side is not touched if tenant 2 failed.
pub async fn ensure_bidirectional_peering(
    tenant1: TenantSide<'_>,
    tenant2: TenantSide<'_>,
) -> Result<PeeringOutcome, PeeringError> {
    let tenant1_vnet = resolve_vnet(&tenant1).await?;
    let tenant1_vnet_id = vnet_id(&tenant1, &tenant1_vnet)?;

    let tenant2_vnet = resolve_vnet(&tenant2).await?;
    let tenant2_vnet_id = vnet_id(&tenant2, &tenant2_vnet)?;

    let (name_on_tenant2, name_on_tenant1) = peering_names(tenant1.config, tenant2.config);

    let on_tenant2 = upsert_peering(&tenant2, &name_on_tenant2, &tenant1_vnet_id).await?;
    let on_tenant1 = upsert_peering(&tenant1, &name_on_tenant1, &tenant2_vnet_id).await?;

    Ok(PeeringOutcome {
        tenant1_vnet,
        tenant2_vnet,
        on_tenant2,
        on_tenant1,
    })
}

async fn resolve_vnet(side: &TenantSide<'_>) -> Result<VirtualNetwork, PeeringError> {
    let config = side.config;
    log::info!(
        "Checking if {} virtual network `{}` exists in resource group `{}`",
        config.label,
        config.virtual_network,
        config.resource_group
    );
    side.vnets
        .get(&config.resource_group, &config.virtual_network)
        .await
        .map_err(|e| {
            PeeringError::api(
                format!(
                    "get {} virtual network {}/{}",
                    config.label, config.resource_group, config.virtual_network
                ),
                e,
            )
        })
}

fn vnet_id(side: &TenantSide<'_>, vnet: &VirtualNetwork) -> Result<String, PeeringError> {
    vnet.id.clone().ok_or_else(|| PeeringError::MissingResourceId {
        resource_group: side.config.resource_group.clone(),
        name: side.config.virtual_network.clone(),
    })
}

async fn upsert_peering(
    side: &TenantSide<'_>,
    peering_name: &str,
    remote_vnet_id: &str,
) -> Result<VirtualNetworkPeering, PeeringError> {
    let config = side.config;
    log::info!(
        "Ensuring vnet peering `{}` exists on the {} vnet `{}` in resource group `{}`",
        peering_name,
        config.label,
        config.virtual_network,
        config.resource_group
    );
    let peering = side
        .peerings
        .create_or_update(
            &config.resource_group,
            &config.virtual_network,
            peering_name,
            &build_peering(remote_vnet_id),
        )
        .await
        .map_err(|e| {
            PeeringError::api(
                format!(
                    "create or update peering {peering_name} on {} vnet {}",
                    config.label, config.virtual_network
                ),
                e,
            )
        })?;
    log::info!(
        "Peering `{peering_name}` on {}: provisioning state {}",
        config.label,
        peering.provisioning_state().unwrap_or("unknown")
    );
    Ok(peering)
}
