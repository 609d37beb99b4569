//! Integration tests for azure-vnet-peering
//!
//! These tests run the whole peering workflow against an in-memory stand-in
//! for the Resource Manager network API.

use async_trait::async_trait;
use azure_vnet_peering::azure::{
    VirtualNetworkPeerings, VirtualNetworks, PEERING_RETRY_ATTEMPTS,
};
use azure_vnet_peering::config::{PeeringConfig, TenantConfig};
use azure_vnet_peering::models::{build_peering, VirtualNetwork, VirtualNetworkPeering};
use azure_vnet_peering::processing::{ensure_bidirectional_peering, TenantSide};
use azure_vnet_peering::{build_clients, ApiError, ErrorKind};
use std::collections::HashMap;
use std::sync::Mutex;

type PeeringKey = (String, String, String);

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Get { resource_group: String, name: String },
    Upsert {
        resource_group: String,
        vnet: String,
        peering: String,
        remote: String,
    },
}

/// Records every call and keeps the last peering applied per name.
#[derive(Default)]
struct FakeNetworkApi {
    vnets: HashMap<(String, String), VirtualNetwork>,
    calls: Mutex<Vec<Call>>,
    peerings: Mutex<HashMap<PeeringKey, VirtualNetworkPeering>>,
}

impl FakeNetworkApi {
    fn with_vnet(mut self, resource_group: &str, name: &str, id: Option<&str>) -> Self {
        self.vnets.insert(
            (resource_group.to_string(), name.to_string()),
            VirtualNetwork {
                id: id.map(str::to_string),
                name: Some(name.to_string()),
                ..Default::default()
            },
        );
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn upserts(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Upsert { .. }))
            .collect()
    }

    fn peering_state(&self) -> HashMap<PeeringKey, VirtualNetworkPeering> {
        self.peerings.lock().unwrap().clone()
    }
}

#[async_trait]
impl VirtualNetworks for FakeNetworkApi {
    async fn get(&self, resource_group: &str, name: &str) -> Result<VirtualNetwork, ApiError> {
        self.calls.lock().unwrap().push(Call::Get {
            resource_group: resource_group.to_string(),
            name: name.to_string(),
        });
        self.vnets
            .get(&(resource_group.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| {
                ApiError::from_response(
                    "GET",
                    &format!("fake://{resource_group}/{name}"),
                    404,
                    r#"{"error":{"code":"ResourceNotFound","message":"not found"}}"#,
                )
            })
    }
}

#[async_trait]
impl VirtualNetworkPeerings for FakeNetworkApi {
    async fn create_or_update(
        &self,
        resource_group: &str,
        vnet_name: &str,
        peering_name: &str,
        peering: &VirtualNetworkPeering,
    ) -> Result<VirtualNetworkPeering, ApiError> {
        self.calls.lock().unwrap().push(Call::Upsert {
            resource_group: resource_group.to_string(),
            vnet: vnet_name.to_string(),
            peering: peering_name.to_string(),
            remote: peering.remote_vnet_id().unwrap_or_default().to_string(),
        });
        let mut stored = peering.clone();
        stored.name = Some(peering_name.to_string());
        self.peerings.lock().unwrap().insert(
            (
                resource_group.to_string(),
                vnet_name.to_string(),
                peering_name.to_string(),
            ),
            stored.clone(),
        );
        Ok(stored)
    }
}

const VNET1_ID: &str =
    "/subscriptions/sub-1/resourceGroups/rg-one/providers/Microsoft.Network/virtualNetworks/vnet-one";
const VNET2_ID: &str =
    "/subscriptions/sub-2/resourceGroups/rg-two/providers/Microsoft.Network/virtualNetworks/vnet-two";

fn env(identical_credentials: bool) -> HashMap<String, String> {
    let mut env = HashMap::new();
    for (prefix, n) in [("TENANT1", "one"), ("TENANT2", "two")] {
        let creds = if identical_credentials { "one" } else { n };
        let pairs = [
            ("RESOURCE_GROUP", format!("rg-{n}")),
            ("VIRTUAL_NETWORK", format!("vnet-{n}")),
            ("AZURE_CLIENTID", format!("client-{creds}")),
            ("AZURE_CLIENTSECRET", format!("secret-{creds}")),
            ("AZURE_TENANTID", format!("tenant-{n}")),
            ("AZURE_SUBSCRIPTIONID", format!("sub-{n}")),
            ("AZURE_AUX_TENANTIDS", String::new()),
        ];
        for (suffix, value) in pairs {
            env.insert(format!("{prefix}_{suffix}"), value);
        }
    }
    env
}

fn config(identical_credentials: bool) -> PeeringConfig {
    let env = env(identical_credentials);
    PeeringConfig::from_lookup(|k| env.get(k).cloned()).expect("complete environment")
}

fn side<'a>(config: &'a TenantConfig, api: &'a FakeNetworkApi) -> TenantSide<'a> {
    TenantSide {
        config,
        vnets: api,
        peerings: api,
    }
}

fn both_vnets() -> FakeNetworkApi {
    FakeNetworkApi::default()
        .with_vnet("rg-one", "vnet-one", Some(VNET1_ID))
        .with_vnet("rg-two", "vnet-two", Some(VNET2_ID))
}

#[tokio::test]
async fn test_both_vnets_resolve_two_upserts() {
    let config = config(false);
    let api = both_vnets();

    let outcome = ensure_bidirectional_peering(
        side(&config.tenant1, &api),
        side(&config.tenant2, &api),
    )
    .await
    .expect("peering succeeds");

    assert_eq!(
        api.calls(),
        vec![
            Call::Get {
                resource_group: "rg-one".to_string(),
                name: "vnet-one".to_string()
            },
            Call::Get {
                resource_group: "rg-two".to_string(),
                name: "vnet-two".to_string()
            },
            Call::Upsert {
                resource_group: "rg-two".to_string(),
                vnet: "vnet-two".to_string(),
                peering: "vnet-one".to_string(),
                remote: VNET1_ID.to_string(),
            },
            Call::Upsert {
                resource_group: "rg-one".to_string(),
                vnet: "vnet-one".to_string(),
                peering: "rg-two".to_string(),
                remote: VNET2_ID.to_string(),
            },
        ]
    );
    assert_eq!(outcome.on_tenant2.remote_vnet_id(), Some(VNET1_ID));
    assert_eq!(outcome.on_tenant1.remote_vnet_id(), Some(VNET2_ID));
    assert_eq!(outcome.tenant1_vnet.id.as_deref(), Some(VNET1_ID));
}

#[tokio::test]
async fn test_tenant1_not_found_makes_no_upserts() {
    let config = config(false);
    let api = FakeNetworkApi::default().with_vnet("rg-two", "vnet-two", Some(VNET2_ID));

    let err = ensure_bidirectional_peering(
        side(&config.tenant1, &api),
        side(&config.tenant2, &api),
    )
    .await
    .expect_err("tenant1 vnet is missing");

    assert_eq!(err.kind(), ErrorKind::Remote);
    assert!(err.api_error().map(ApiError::is_not_found).unwrap_or(false));
    assert_eq!(api.calls().len(), 1, "stops after the first lookup");
    assert!(api.upserts().is_empty());
}

#[tokio::test]
async fn test_tenant2_not_found_makes_no_upserts() {
    let config = config(false);
    let api = FakeNetworkApi::default().with_vnet("rg-one", "vnet-one", Some(VNET1_ID));

    let err = ensure_bidirectional_peering(
        side(&config.tenant1, &api),
        side(&config.tenant2, &api),
    )
    .await
    .expect_err("tenant2 vnet is missing");

    assert_eq!(err.kind(), ErrorKind::Remote);
    assert!(api.upserts().is_empty());
}

#[tokio::test]
async fn test_vnet_without_id_is_fatal() {
    let config = config(false);
    let api = FakeNetworkApi::default()
        .with_vnet("rg-one", "vnet-one", None)
        .with_vnet("rg-two", "vnet-two", Some(VNET2_ID));

    let err = ensure_bidirectional_peering(
        side(&config.tenant1, &api),
        side(&config.tenant2, &api),
    )
    .await
    .expect_err("missing id");

    assert!(err.to_string().contains("vnet-one"));
    assert!(api.upserts().is_empty());
}

#[tokio::test]
async fn test_rerun_converges_to_same_state() {
    let config = config(false);
    let api = both_vnets();

    for _ in 0..2 {
        ensure_bidirectional_peering(side(&config.tenant1, &api), side(&config.tenant2, &api))
            .await
            .expect("peering succeeds");
    }
    let after_two_runs = api.peering_state();

    assert_eq!(api.upserts().len(), 4);
    assert_eq!(after_two_runs.len(), 2, "one peering per side, not duplicated");

    api.create_or_update("rg-two", "vnet-two", "vnet-one", &build_peering(VNET1_ID))
        .await
        .unwrap();
    assert_eq!(api.peering_state(), after_two_runs);
}

#[tokio::test]
async fn test_identical_credentials_still_target_configured_networks() {
    let config = config(true);
    assert_eq!(config.tenant1.client_id, config.tenant2.client_id);
    assert_eq!(config.tenant1.client_secret, config.tenant2.client_secret);

    let (tenant1, tenant2) = build_clients(&config).expect("clients build without network");
    assert_eq!(tenant1.vnets.arm().subscription_id(), "sub-one");
    assert_eq!(tenant2.vnets.arm().subscription_id(), "sub-two");
    assert_eq!(tenant1.vnets.arm().retry_attempts(), 0);
    assert_eq!(tenant2.peerings.arm().retry_attempts(), PEERING_RETRY_ATTEMPTS);

    let api = both_vnets();
    ensure_bidirectional_peering(side(&config.tenant1, &api), side(&config.tenant2, &api))
        .await
        .expect("peering succeeds");

    let groups: Vec<String> = api
        .upserts()
        .into_iter()
        .map(|c| match c {
            Call::Upsert { resource_group, .. } => resource_group,
            Call::Get { .. } => unreachable!(),
        })
        .collect();
    assert_eq!(groups, vec!["rg-two", "rg-one"]);
}

#[test]
fn test_missing_variable_fails_before_any_client() {
    for missing in ["TENANT1_AZURE_CLIENTSECRET", "TENANT2_AZURE_AUX_TENANTIDS"] {
        let mut env = env(false);
        env.remove(missing);
        let err = PeeringConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert_eq!(err.to_string(), format!("{missing} must be set in the environment"));
    }
}
