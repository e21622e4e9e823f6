//! Gateway control-plane client port definition.

use crate::domain::{ApiId, ApplicationId, GatewayError, GroupId, ResolvedIdentifiers};

/// Duration of an access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrantDuration {
    /// Non-expiring grant.
    #[default]
    Permanent,
}

impl GrantDuration {
    /// Convert to the control plane's string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantDuration::Permanent => "PERMANENT",
        }
    }
}

/// A fully resolved authorization request binding one application to a set
/// of APIs within one group.
#[derive(Debug, Clone)]
pub struct AccessGrant {
    pub application_id: ApplicationId,
    pub group_id: GroupId,
    /// In input order, one entry per requested API name.
    pub api_ids: Vec<ApiId>,
    pub duration: GrantDuration,
}

impl AccessGrant {
    /// Build a non-expiring grant from a complete set of resolved
    /// identifiers.
    pub fn permanent(resolved: ResolvedIdentifiers) -> Self {
        Self {
            application_id: resolved.application_id,
            group_id: resolved.group_id,
            api_ids: resolved.api_ids,
            duration: GrantDuration::Permanent,
        }
    }
}

/// Acknowledgement returned by the control plane for a grant request.
#[derive(Debug, Clone)]
pub struct GrantAcknowledgement {
    /// Service-assigned request identifier, useful for support tickets.
    pub request_id: String,
}

/// Port for the gateway control-plane lookups and the authorization call.
///
/// Lookups return `Ok(None)` when the service reports zero matches, and the
/// first matching record's identifier otherwise; callers decide whether an
/// empty result is an error. Every call is a single attempt, no retries.
pub trait GatewayClient {
    /// Look up an application by its human-chosen name.
    fn find_application(&self, app_name: &str) -> Result<Option<ApplicationId>, GatewayError>;

    /// Look up an API group by its human-chosen name.
    fn find_group(&self, group_name: &str) -> Result<Option<GroupId>, GatewayError>;

    /// Look up a single API by name, scoped to a group.
    fn find_api(&self, group_id: &GroupId, api_name: &str) -> Result<Option<ApiId>, GatewayError>;

    /// Submit one authorization request binding the grant's identifiers.
    fn set_apis_authorities(
        &self,
        grant: &AccessGrant,
    ) -> Result<GrantAcknowledgement, GatewayError>;
}
