//! Name resolution and access-grant orchestration.

use crate::domain::{
    ApiId, ApplicationId, GrantError, GroupId, ResolutionContext, ResolvedIdentifiers,
};
use crate::ports::{AccessGrant, GatewayClient, GrantAcknowledgement};

/// Resolves the configured names to gateway identifiers and issues one
/// permanent access grant binding them.
///
/// Each remote call is attempted exactly once and the first failure aborts
/// the run; no authorization request is built from a partial set of
/// identifiers.
pub struct Authorizer<C: GatewayClient> {
    client: C,
    context: ResolutionContext,
}

impl<C: GatewayClient> Authorizer<C> {
    pub fn new(client: C, context: ResolutionContext) -> Self {
        Self { client, context }
    }

    /// Resolve the configured application name to its identifier.
    pub fn resolve_application_id(&self) -> Result<ApplicationId, GrantError> {
        let name = non_empty(&self.context.application_name, "application name")?;
        match self.client.find_application(name) {
            Ok(Some(id)) => Ok(id),
            Ok(None) => Err(GrantError::ApplicationNotFound { name: name.to_string() }),
            Err(source) => Err(GrantError::ApplicationLookup { name: name.to_string(), source }),
        }
    }

    /// Resolve the configured group name to its identifier.
    pub fn resolve_group_id(&self) -> Result<GroupId, GrantError> {
        let name = non_empty(&self.context.group_name, "group name")?;
        match self.client.find_group(name) {
            Ok(Some(id)) => Ok(id),
            Ok(None) => Err(GrantError::GroupNotFound { name: name.to_string() }),
            Err(source) => Err(GrantError::GroupLookup { name: name.to_string(), source }),
        }
    }

    /// Resolve every configured API name within `group_id`, preserving input
    /// order and multiplicity.
    ///
    /// The group id is taken as a parameter so one resolution serves all
    /// lookups; callers must not re-resolve it per name.
    pub fn resolve_api_ids(&self, group_id: &GroupId) -> Result<Vec<ApiId>, GrantError> {
        let mut api_ids = Vec::with_capacity(self.context.api_names.len());
        for raw_name in &self.context.api_names {
            let name = non_empty(raw_name, "API name")?;
            match self.client.find_api(group_id, name) {
                Ok(Some(id)) => api_ids.push(id),
                Ok(None) => return Err(GrantError::ApiNotFound { name: name.to_string() }),
                Err(source) => {
                    return Err(GrantError::ApiLookup { name: name.to_string(), source });
                }
            }
        }
        Ok(api_ids)
    }

    /// Run the full workflow: resolve the application, resolve the group
    /// once, resolve every API id against that group, then submit one
    /// permanent grant binding all of them.
    pub fn grant_access(&self) -> Result<GrantAcknowledgement, GrantError> {
        let application_id = self.resolve_application_id()?;
        let group_id = self.resolve_group_id()?;
        let api_ids = self.resolve_api_ids(&group_id)?;

        let resolved = ResolvedIdentifiers { application_id, group_id, api_ids };
        self.client
            .set_apis_authorities(&AccessGrant::permanent(resolved))
            .map_err(|source| GrantError::Authorization { source })
    }
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, GrantError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GrantError::EmptyName(field));
    }
    Ok(trimmed)
}
