use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{ApiId, ApplicationId, GatewayError, GroupId};
use crate::ports::{AccessGrant, GatewayClient, GrantAcknowledgement};

/// One remote call observed by [`FakeGatewayClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    FindApplication { app_name: String },
    FindGroup { group_name: String },
    FindApi { group_id: String, api_name: String },
    SetApisAuthorities { app_id: String, group_id: String, api_ids: Vec<String>, duration: String },
}

/// In-memory gateway client for service tests.
///
/// Records every call so tests can assert on call counts and payloads, and
/// resolves names through programmable maps. Unknown names yield `Ok(None)`
/// like an empty result from the real service.
#[derive(Clone, Default)]
pub struct FakeGatewayClient {
    applications: HashMap<String, String>,
    groups: HashMap<String, String>,
    apis: HashMap<String, String>,
    fail_group_lookup: bool,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeGatewayClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_application(mut self, name: &str, id: &str) -> Self {
        self.applications.insert(name.to_string(), id.to_string());
        self
    }

    pub fn with_group(mut self, name: &str, id: &str) -> Self {
        self.groups.insert(name.to_string(), id.to_string());
        self
    }

    pub fn with_api(mut self, name: &str, id: &str) -> Self {
        self.apis.insert(name.to_string(), id.to_string());
        self
    }

    /// Make every group lookup fail with a transient service error.
    pub fn failing_group_lookup(mut self) -> Self {
        self.fail_group_lookup = true;
        self
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn group_lookup_count(&self) -> usize {
        self.count_matching(|call| matches!(call, RecordedCall::FindGroup { .. }))
    }

    pub fn api_lookup_count(&self) -> usize {
        self.count_matching(|call| matches!(call, RecordedCall::FindApi { .. }))
    }

    pub fn authorization_count(&self) -> usize {
        self.count_matching(|call| matches!(call, RecordedCall::SetApisAuthorities { .. }))
    }

    fn count_matching(&self, predicate: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn transient_failure() -> GatewayError {
        GatewayError::Service {
            status: 503,
            code: "ServiceUnavailable".to_string(),
            message: "upstream briefly unavailable".to_string(),
        }
    }
}

impl GatewayClient for FakeGatewayClient {
    fn find_application(&self, app_name: &str) -> Result<Option<ApplicationId>, GatewayError> {
        self.record(RecordedCall::FindApplication { app_name: app_name.to_string() });
        Ok(self.applications.get(app_name).cloned().map(ApplicationId::new))
    }

    fn find_group(&self, group_name: &str) -> Result<Option<GroupId>, GatewayError> {
        self.record(RecordedCall::FindGroup { group_name: group_name.to_string() });
        if self.fail_group_lookup {
            return Err(Self::transient_failure());
        }
        Ok(self.groups.get(group_name).cloned().map(GroupId::new))
    }

    fn find_api(&self, group_id: &GroupId, api_name: &str) -> Result<Option<ApiId>, GatewayError> {
        self.record(RecordedCall::FindApi {
            group_id: group_id.as_str().to_string(),
            api_name: api_name.to_string(),
        });
        Ok(self.apis.get(api_name).cloned().map(ApiId::new))
    }

    fn set_apis_authorities(
        &self,
        grant: &AccessGrant,
    ) -> Result<GrantAcknowledgement, GatewayError> {
        self.record(RecordedCall::SetApisAuthorities {
            app_id: grant.application_id.as_str().to_string(),
            group_id: grant.group_id.as_str().to_string(),
            api_ids: grant.api_ids.iter().map(|id| id.as_str().to_string()).collect(),
            duration: grant.duration.as_str().to_string(),
        });
        Ok(GrantAcknowledgement { request_id: "fake-request".to_string() })
    }
}
