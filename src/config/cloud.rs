//! Azure cloud environments and their endpoints.

use crate::error::ConfigError;
use azure_core::{authority_hosts, resource_manager_endpoint, Url};
use std::fmt;

/// Endpoints of a named Azure cloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudEnvironment {
    /// Canonical name, e.g. `AZUREPUBLICCLOUD`.
    pub name: &'static str,
    /// Azure Active Directory authority host.
    pub active_directory_endpoint: Url,
    /// Azure Resource Manager base URL.
    pub resource_manager_endpoint: Url,
}

pub const CLOUD_NAMES: [&str; 3] = [
    "AZUREPUBLICCLOUD",
    "AZURECHINACLOUD",
    "AZUREUSGOVERNMENTCLOUD",
];

impl CloudEnvironment {
    pub fn public() -> CloudEnvironment {
        CloudEnvironment {
            name: CLOUD_NAMES[0],
            active_directory_endpoint: authority_hosts::AZURE_PUBLIC_CLOUD.clone(),
            resource_manager_endpoint: resource_manager_endpoint::AZURE_PUBLIC_CLOUD.clone(),
        }
    }

    pub fn china() -> CloudEnvironment {
        CloudEnvironment {
            name: CLOUD_NAMES[1],
            active_directory_endpoint: authority_hosts::AZURE_CHINA_CLOUD.clone(),
            resource_manager_endpoint: resource_manager_endpoint::AZURE_CHINA_CLOUD.clone(),
        }
    }

    pub fn us_government() -> CloudEnvironment {
        CloudEnvironment {
            name: CLOUD_NAMES[2],
            active_directory_endpoint: authority_hosts::AZURE_US_GOVERNMENT_CLOUD.clone(),
            resource_manager_endpoint: resource_manager_endpoint::AZURE_US_GOVERNMENT_CLOUD
                .clone(),
        }
    }

    /// Look up a cloud by name, ignoring case.
    ///
    /// # Examples
    /// ```
    /// use azure_vnet_peering::config::CloudEnvironment;
    /// let cloud = CloudEnvironment::from_name("AzurePublicCloud").unwrap();
    /// assert_eq!(cloud.resource_manager_endpoint.host_str(), Some("management.azure.com"));
    /// ```
    pub fn from_name(name: &str) -> Result<CloudEnvironment, ConfigError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "AZUREPUBLICCLOUD" => Ok(Self::public()),
            "AZURECHINACLOUD" => Ok(Self::china()),
            "AZUREUSGOVERNMENTCLOUD" => Ok(Self::us_government()),
            _ => Err(ConfigError::UnknownEnvironment {
                name: name.to_string(),
            }),
        }
    }

    /// OAuth scope for Resource Manager tokens.
    pub fn token_scope(&self) -> String {
        let endpoint = self.resource_manager_endpoint.as_str();
        format!("{}/.default", endpoint.trim_end_matches('/'))
    }
}

impl Default for CloudEnvironment {
    fn default() -> Self {
        Self::public()
    }
}

impl fmt::Display for CloudEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
