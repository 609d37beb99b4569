//! Resource Manager payloads.
//!
//! - [`VirtualNetwork`] - the network looked up on each side
//! - [`VirtualNetworkPeering`] - the peering request/response, built by
//!   [`build_peering`]

mod peering;
mod vnet;

pub use peering::{build_peering, VirtualNetworkPeering, VirtualNetworkPeeringProperties};
pub use vnet::{AddressSpace, SubResource, VirtualNetwork, VirtualNetworkProperties};
