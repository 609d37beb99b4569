//! Azure Resource Manager access.
//!
//! This module handles all Azure-related operations:
//! - [`auth`] - Service principal tokens (primary and auxiliary tenants)
//! - [`arm`] - Authenticated JSON requests with retry
//! - [`network`] - Virtual network and peering operations
//! - [`clients`] - Building the clients for one tenant
//! - [`observer`] - Request/response logging hook

pub mod arm;
pub mod auth;
pub mod clients;
pub mod network;
pub mod observer;

// Re-export public types and functions
pub use arm::{ArmClient, AUXILIARY_AUTH_HEADER, NETWORK_API_VERSION};
pub use auth::{MultiTenantServicePrincipal, StaticTokenSource, TokenSource};
pub use clients::{TenantClients, PEERING_RETRY_ATTEMPTS};
pub use network::{
    VirtualNetworkPeerings, VirtualNetworkPeeringsClient, VirtualNetworks, VirtualNetworksClient,
};
pub use observer::{HttpObserver, RequestLogger};
