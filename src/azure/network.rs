//! Virtual network and peering operations.
//!
//! The traits are what the peering workflow talks to; the `*Client` types
//! implement them on top of an [`ArmClient`].

use super::arm::ArmClient;
use crate::error::ApiError;
use crate::models::{VirtualNetwork, VirtualNetworkPeering};
use async_trait::async_trait;

/// Read access to virtual networks.
#[async_trait]
pub trait VirtualNetworks: Send + Sync {
    /// Look up a virtual network by resource group and name.
    async fn get(&self, resource_group: &str, name: &str) -> Result<VirtualNetwork, ApiError>;
}

/// Create-or-update access to virtual network peerings.
#[async_trait]
pub trait VirtualNetworkPeerings: Send + Sync {
    /// Create the peering `peering_name` on `vnet_name`, or update it in
    /// place if it exists.
    async fn create_or_update(
        &self,
        resource_group: &str,
        vnet_name: &str,
        peering_name: &str,
        peering: &VirtualNetworkPeering,
    ) -> Result<VirtualNetworkPeering, ApiError>;
}

pub struct VirtualNetworksClient {
    arm: ArmClient,
}

impl VirtualNetworksClient {
    pub fn new(arm: ArmClient) -> VirtualNetworksClient {
        VirtualNetworksClient { arm }
    }

    pub fn arm(&self) -> &ArmClient {
        &self.arm
    }
}

#[async_trait]
impl VirtualNetworks for VirtualNetworksClient {
    async fn get(&self, resource_group: &str, name: &str) -> Result<VirtualNetwork, ApiError> {
        let url = self.arm.resource_url(
            resource_group,
            &["Microsoft.Network", "virtualNetworks", name],
        )?;
        self.arm.get_json(url).await
    }
}

pub struct VirtualNetworkPeeringsClient {
    arm: ArmClient,
}

impl VirtualNetworkPeeringsClient {
    pub fn new(arm: ArmClient) -> VirtualNetworkPeeringsClient {
        VirtualNetworkPeeringsClient { arm }
    }

    pub fn arm(&self) -> &ArmClient {
        &self.arm
    }
}

#[async_trait]
impl VirtualNetworkPeerings for VirtualNetworkPeeringsClient {
    async fn create_or_update(
        &self,
        resource_group: &str,
        vnet_name: &str,
        peering_name: &str,
        peering: &VirtualNetworkPeering,
    ) -> Result<VirtualNetworkPeering, ApiError> {
        let url = self.arm.resource_url(
            resource_group,
            &[
                "Microsoft.Network",
                "virtualNetworks",
                vnet_name,
                "virtualNetworkPeerings",
                peering_name,
            ],
        )?;
        self.arm.put_json(url, peering).await
    }
}
