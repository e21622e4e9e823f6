//! apigrant: resolve application, group, and API names against an
//! API-gateway control plane and grant the application permanent access to
//! the named APIs.
//!
//! The workflow is four sequential remote lookups followed by one mutating
//! call: application name to application id, group name to group id, each
//! API name to an API id within that group, then a single `SetApisAuthorities`
//! request binding all of them with a non-expiring grant.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use adapters::HttpGatewayClient;
use domain::ResolutionContext;
use services::Authorizer;

pub use config::{Credentials, GatewayConfig};
pub use domain::{GatewayError, GrantError};
pub use ports::GrantAcknowledgement;

/// Execute one authorization workflow against the configured gateway.
///
/// Credentials are read from the `access_key_id` and `access_key_secret`
/// environment variables. Either the grant is fully issued or a
/// [`GrantError`] names the operation and entity that failed; no partial
/// authorization is ever submitted.
pub fn grant_access(
    config: &GatewayConfig,
    application_name: &str,
    group_name: &str,
    api_names: &[String],
) -> Result<GrantAcknowledgement, GrantError> {
    let client = HttpGatewayClient::from_env(config)?;
    let context = ResolutionContext::new(application_name, group_name, api_names.to_vec());
    Authorizer::new(client, context).grant_access()
}
