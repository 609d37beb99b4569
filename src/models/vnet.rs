//! Azure Virtual Network (VNet) resource as returned by Resource Manager.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to another ARM resource by id.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Address prefixes of a virtual network.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
    #[serde(default)]
    pub address_prefixes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_space: Option<AddressSpace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// An Azure virtual network. Only the fields this tool reads are modelled.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualNetwork {
    /// Opaque ARM resource id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<VirtualNetworkProperties>,
}

impl VirtualNetwork {
    pub fn address_prefixes(&self) -> &[String] {
        self.properties
            .as_ref()
            .and_then(|p| p.address_space.as_ref())
            .map(|a| a.address_prefixes.as_slice())
            .unwrap_or(&[])
    }
}

impl fmt::Display for VirtualNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({})",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.address_prefixes().join(", "),
            self.location.as_deref().unwrap_or("unknown location")
        )
    }
}
