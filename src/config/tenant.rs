//! Per-tenant settings read from `TENANT{1,2}_*` environment variables.

use crate::error::ConfigError;
use std::fmt;

/// Connection details and target network for one tenant.
#[derive(Clone, PartialEq, Eq)]
pub struct TenantConfig {
    /// Short label used in log messages, e.g. `tenant1`.
    pub label: String,
    pub resource_group: String,
    pub virtual_network: String,
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    pub subscription_id: String,
    /// Normalized auxiliary tenant ids (no empty entries).
    pub auxiliary_tenant_ids: Vec<String>,
}

impl TenantConfig {
    /// Read all variables for `prefix` (e.g. `TENANT1`) through `lookup`.
    ///
    /// Variables are read in a fixed order and the first missing one is
    /// returned as [`ConfigError::MissingVar`].
    pub fn from_lookup<F>(prefix: &str, lookup: &F) -> Result<TenantConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |suffix: &str| -> Result<String, ConfigError> {
            let name = format!("{prefix}_{suffix}");
            lookup(&name).ok_or(ConfigError::MissingVar { name })
        };

        let resource_group = required("RESOURCE_GROUP")?;
        let virtual_network = required("VIRTUAL_NETWORK")?;
        let client_id = required("AZURE_CLIENTID")?;
        let client_secret = required("AZURE_CLIENTSECRET")?;
        let tenant_id = required("AZURE_TENANTID")?;
        let subscription_id = required("AZURE_SUBSCRIPTIONID")?;
        let aux_raw = required("AZURE_AUX_TENANTIDS")?;

        Ok(TenantConfig {
            label: prefix.to_lowercase(),
            resource_group,
            virtual_network,
            client_id,
            client_secret,
            tenant_id,
            subscription_id,
            auxiliary_tenant_ids: normalize_tenant_ids(split_tenant_ids(&aux_raw)),
        })
    }

    /// Variable names read for `prefix`, in lookup order.
    pub fn variable_names(prefix: &str) -> Vec<String> {
        [
            "RESOURCE_GROUP",
            "VIRTUAL_NETWORK",
            "AZURE_CLIENTID",
            "AZURE_CLIENTSECRET",
            "AZURE_TENANTID",
            "AZURE_SUBSCRIPTIONID",
            "AZURE_AUX_TENANTIDS",
        ]
        .iter()
        .map(|suffix| format!("{prefix}_{suffix}"))
        .collect()
    }
}

impl fmt::Debug for TenantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantConfig")
            .field("label", &self.label)
            .field("resource_group", &self.resource_group)
            .field("virtual_network", &self.virtual_network)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .field("subscription_id", &self.subscription_id)
            .field("auxiliary_tenant_ids", &self.auxiliary_tenant_ids)
            .finish()
    }
}

/// Split a comma-separated tenant id list, keeping order and empty tokens.
///
/// An empty input yields a single empty string, use
/// [`normalize_tenant_ids`] before handing the list to a credential.
pub fn split_tenant_ids(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Trim every id and drop the empty ones.
pub fn normalize_tenant_ids(ids: Vec<String>) -> Vec<String> {
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env(prefix: &str) -> HashMap<String, String> {
        TenantConfig::variable_names(prefix)
            .into_iter()
            .map(|name| {
                let value = if name.ends_with("AUX_TENANTIDS") {
                    "aux-a,aux-b".to_string()
                } else {
                    format!("{}-value", name.to_lowercase())
                };
                (name, value)
            })
            .collect()
    }

    #[test]
    fn test_split_tenant_ids_preserves_order() {
        assert_eq!(
            split_tenant_ids("t-3,t-1,t-2"),
            vec!["t-3".to_string(), "t-1".to_string(), "t-2".to_string()]
        );
    }

    #[test]
    fn test_split_tenant_ids_empty() {
        assert_eq!(split_tenant_ids(""), vec![String::new()]);
        assert!(normalize_tenant_ids(split_tenant_ids("")).is_empty());
    }

    #[test]
    fn test_normalize_tenant_ids() {
        let ids = split_tenant_ids(" a ,, b,");
        assert_eq!(ids.len(), 4);
        assert_eq!(
            normalize_tenant_ids(ids),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_from_lookup() {
        let env = full_env("TENANT1");
        let tenant = TenantConfig::from_lookup("TENANT1", &|k| env.get(k).cloned())
            .expect("all variables set");
        assert_eq!(tenant.label, "tenant1");
        assert_eq!(tenant.resource_group, "tenant1_resource_group-value");
        assert_eq!(tenant.virtual_network, "tenant1_virtual_network-value");
        assert_eq!(tenant.tenant_id, "tenant1_azure_tenantid-value");
        assert_eq!(tenant.auxiliary_tenant_ids, vec!["aux-a", "aux-b"]);
    }

    #[test]
    fn test_from_lookup_each_missing_variable_is_named() {
        for missing in TenantConfig::variable_names("TENANT2") {
            let mut env = full_env("TENANT2");
            env.remove(&missing);
            let err = TenantConfig::from_lookup("TENANT2", &|k| env.get(k).cloned())
                .expect_err("variable removed");
            match err {
                ConfigError::MissingVar { name } => assert_eq!(name, missing),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_aux_means_no_auxiliary_tenants() {
        let mut env = full_env("TENANT1");
        env.insert("TENANT1_AZURE_AUX_TENANTIDS".to_string(), String::new());
        let tenant = TenantConfig::from_lookup("TENANT1", &|k| env.get(k).cloned()).unwrap();
        assert!(tenant.auxiliary_tenant_ids.is_empty());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let env = full_env("TENANT1");
        let tenant = TenantConfig::from_lookup("TENANT1", &|k| env.get(k).cloned()).unwrap();
        let printed = format!("{tenant:?}");
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("tenant1_azure_clientsecret-value"));
    }
}
