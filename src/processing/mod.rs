//! Peering workflow.
//!
//! - [`peering`] - look up both networks and upsert the peering on each side

pub mod peering;

pub use peering::{ensure_bidirectional_peering, peering_names, PeeringOutcome, TenantSide};
