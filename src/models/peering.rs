//! Virtual network peering resource and the fixed-policy request builder.

use super::SubResource;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkPeeringProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_virtual_network_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_forwarded_traffic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_gateway_transit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_remote_gateways: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_virtual_network: Option<SubResource>,
    /// Read-only, set by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peering_state: Option<String>,
    /// Read-only, set by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// A peering on one virtual network pointing at a remote one.
///
/// Used both as the create-or-update request body and as the response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualNetworkPeering {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<VirtualNetworkPeeringProperties>,
}

impl VirtualNetworkPeering {
    /// Id of the network this peering points at.
    pub fn remote_vnet_id(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.remote_virtual_network.as_ref())
            .and_then(|r| r.id.as_deref())
    }

    pub fn peering_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.peering_state.as_deref())
    }

    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

/// Build the peering request for `remote_vnet_id`.
///
/// Always allows virtual network access and disables forwarded traffic,
/// gateway transit and remote gateways. The id is passed through as is.
///
/// # Examples
/// ```
/// use azure_vnet_peering::models::build_peering;
/// let peering = build_peering("/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/v");
/// assert_eq!(peering.remote_vnet_id(), Some("/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/v"));
/// ```
pub fn build_peering(remote_vnet_id: &str) -> VirtualNetworkPeering {
    VirtualNetworkPeering {
        id: None,
        name: None,
        properties: Some(VirtualNetworkPeeringProperties {
            allow_virtual_network_access: Some(true),
            allow_forwarded_traffic: Some(false),
            allow_gateway_transit: Some(false),
            use_remote_gateways: Some(false),
            remote_virtual_network: Some(SubResource {
                id: Some(remote_vnet_id.to_string()),
            }),
            peering_state: None,
            provisioning_state: None,
        }),
    }
}

impl fmt::Display for VirtualNetworkPeering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (peering={}, provisioning={})",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.remote_vnet_id().unwrap_or("<no remote>"),
            self.peering_state().unwrap_or("unknown"),
            self.provisioning_state().unwrap_or("unknown"),
        )
    }
}
