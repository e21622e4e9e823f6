//! Request-scoped records for one authorization run.

use super::identifiers::{ApiId, ApplicationId, GroupId};

/// The human-chosen names driving one authorization run.
///
/// Built once per run and read-only thereafter. `api_names` keeps
/// duplicates; each entry is resolved independently and produces its own
/// entry in the resolved output.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    pub application_name: String,
    pub group_name: String,
    pub api_names: Vec<String>,
}

impl ResolutionContext {
    pub fn new(
        application_name: impl Into<String>,
        group_name: impl Into<String>,
        api_names: Vec<String>,
    ) -> Self {
        Self {
            application_name: application_name.into(),
            group_name: group_name.into(),
            api_names,
        }
    }
}

/// The complete set of identifiers required before a grant may be issued.
///
/// Only ever constructed after every lookup succeeded; a failed run discards
/// whatever was resolved so far instead of acting on a partial set.
#[derive(Debug, Clone)]
pub struct ResolvedIdentifiers {
    pub application_id: ApplicationId,
    pub group_id: GroupId,
    /// One id per input name, in input order.
    pub api_ids: Vec<ApiId>,
}
