//! Service principal credentials for Resource Manager calls.
//!
//! A [`TokenSource`] hands out the primary bearer token and one token per
//! auxiliary tenant. The auxiliary tokens let a single request act on
//! resources in tenants other than the one the principal lives in.

use crate::config::{CloudEnvironment, TenantConfig};
use crate::error::AuthError;
use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use azure_core::Url;
use azure_identity::{ClientSecretCredential, TokenCredentialOptions};

/// Source of bearer tokens for ARM requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Token for the tenant the client primarily acts in.
    async fn primary_token(&self) -> Result<String, AuthError>;

    /// Tokens for the auxiliary tenants, in configuration order.
    async fn auxiliary_tokens(&self) -> Result<Vec<String>, AuthError>;
}

/// Client-credential login to a primary tenant plus zero or more auxiliary
/// tenants, all with the same client id and secret.
///
/// Token acquisition and caching are left to [`ClientSecretCredential`].
pub struct MultiTenantServicePrincipal {
    scope: String,
    primary: (String, ClientSecretCredential),
    auxiliary: Vec<(String, ClientSecretCredential)>,
}

impl MultiTenantServicePrincipal {
    /// Build credentials for `tenant` against `cloud`.
    ///
    /// No network traffic happens here, the first token is fetched on the
    /// first request.
    pub fn new(
        tenant: &TenantConfig,
        cloud: &CloudEnvironment,
    ) -> Result<MultiTenantServicePrincipal, AuthError> {
        let authority = checked_endpoint(&cloud.active_directory_endpoint)?;

        log::info!(
            "Getting multi OAuth config for endpoint {} with tenant {} (aux tenants: {:?})",
            cloud.active_directory_endpoint,
            tenant.tenant_id,
            tenant.auxiliary_tenant_ids
        );

        let credential_for = |tenant_id: &str| {
            ClientSecretCredential::new(
                azure_core::new_http_client(),
                tenant_id.to_string(),
                tenant.client_id.clone(),
                tenant.client_secret.clone(),
                TokenCredentialOptions::new(authority.clone()),
            )
        };

        Ok(MultiTenantServicePrincipal {
            scope: cloud.token_scope(),
            primary: (tenant.tenant_id.clone(), credential_for(&tenant.tenant_id)),
            auxiliary: tenant
                .auxiliary_tenant_ids
                .iter()
                .map(|id| (id.clone(), credential_for(id)))
                .collect(),
        })
    }

    pub fn primary_tenant_id(&self) -> &str {
        &self.primary.0
    }

    pub fn auxiliary_tenant_ids(&self) -> Vec<&str> {
        self.auxiliary.iter().map(|(id, _)| id.as_str()).collect()
    }

    async fn token_for(
        &self,
        tenant_id: &str,
        credential: &ClientSecretCredential,
    ) -> Result<String, AuthError> {
        let token = credential
            .get_token(&[self.scope.as_str()])
            .await
            .map_err(|source| AuthError::Token {
                tenant_id: tenant_id.to_string(),
                source,
            })?;
        Ok(token.token.secret().to_string())
    }
}

#[async_trait]
impl TokenSource for MultiTenantServicePrincipal {
    async fn primary_token(&self) -> Result<String, AuthError> {
        let (tenant_id, credential) = &self.primary;
        self.token_for(tenant_id, credential).await
    }

    async fn auxiliary_tokens(&self) -> Result<Vec<String>, AuthError> {
        let mut tokens = Vec::with_capacity(self.auxiliary.len());
        for (tenant_id, credential) in &self.auxiliary {
            tokens.push(self.token_for(tenant_id, credential).await?);
        }
        Ok(tokens)
    }
}

/// An endpoint must be an http(s) URL that paths can be appended to.
pub(crate) fn checked_endpoint(endpoint: &Url) -> Result<Url, AuthError> {
    let invalid = |reason: &str| AuthError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    };
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if endpoint.cannot_be_a_base() || endpoint.host_str().is_none() {
        return Err(invalid("no host to append paths to"));
    }
    Ok(endpoint.clone())
}

/// Fixed tokens, for talking to a local endpoint.
pub struct StaticTokenSource {
    pub primary: String,
    pub auxiliary: Vec<String>,
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn primary_token(&self) -> Result<String, AuthError> {
        Ok(self.primary.clone())
    }

    async fn auxiliary_tokens(&self) -> Result<Vec<String>, AuthError> {
        Ok(self.auxiliary.clone())
    }
}
