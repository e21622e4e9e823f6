//! Gateway control-plane client implementation using reqwest.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};
use url::Url;

use crate::config::{Credentials, GatewayConfig};
use crate::domain::{ApiId, ApplicationId, GatewayError, GrantError, GroupId};
use crate::ports::{AccessGrant, GatewayClient, GrantAcknowledgement};

const ACTION_HEADER: &str = "x-acs-action";
const VERSION_HEADER: &str = "x-acs-version";
const DATE_HEADER: &str = "x-acs-date";
const API_VERSION: &str = "2016-07-14";
const SIGNATURE_ALGORITHM: &str = "ACS3-HMAC-SHA256";
const DEFAULT_STATUS_MESSAGE: &str = "gateway request failed";

const ACTION_DESCRIBE_APPS: &str = "DescribeAppAttributes";
const ACTION_DESCRIBE_GROUPS: &str = "DescribeApiGroups";
const ACTION_DESCRIBE_APIS: &str = "DescribeApis";
const ACTION_SET_AUTHORITIES: &str = "SetApisAuthorities";

type HmacSha256 = Hmac<Sha256>;

/// HTTP transport for the gateway control plane.
///
/// Each operation is one signed POST to the endpoint root, with the RPC
/// named by the `x-acs-action` header. Every call is a single attempt; this
/// client performs no retries.
#[derive(Clone)]
pub struct HttpGatewayClient {
    credentials: Credentials,
    endpoint: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGatewayClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl HttpGatewayClient {
    /// Create a new client with explicit credentials.
    pub fn new(credentials: Credentials, config: &GatewayConfig) -> Result<Self, GrantError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GrantError::config_error(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { credentials, endpoint: config.endpoint.clone(), client })
    }

    /// Create a client with credentials from the process environment.
    pub fn from_env(config: &GatewayConfig) -> Result<Self, GrantError> {
        Self::new(Credentials::from_env()?, config)
    }

    fn dispatch<Req, Resp>(&self, action: &str, request: &Req) -> Result<Resp, GatewayError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_string(request)?;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let signature = self.sign(action, &timestamp, &body);
        let authorization = format!(
            "{SIGNATURE_ALGORITHM} Credential={},Signature={}",
            self.credentials.access_key_id, signature
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACTION_HEADER, action)
            .header(VERSION_HEADER, API_VERSION)
            .header(DATE_HEADER, &timestamp)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body_text).map_err(|e| GatewayError::InvalidResponse {
                status: status.as_u16(),
                message: format!("{action}: {e}"),
            });
        }

        let (code, message) = extract_service_error(&body_text, status);
        Err(GatewayError::Service { status: status.as_u16(), code, message })
    }

    /// Sign the action, timestamp, and body digest with the access-key
    /// secret. The secret is the HMAC key and never placed in the request.
    fn sign(&self, action: &str, timestamp: &str, body: &str) -> String {
        let payload_hash = to_hex(&Sha256::digest(body.as_bytes()));
        let string_to_sign = format!("{action}\n{timestamp}\n{payload_hash}");

        let mut mac = HmacSha256::new_from_slice(self.credentials.access_key_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(string_to_sign.as_bytes());
        to_hex(&mac.finalize().into_bytes())
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

fn extract_service_error(body: &str, status: StatusCode) -> (String, String) {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        let code =
            parsed.get("Code").and_then(|code| code.as_str()).unwrap_or("Unknown").to_string();
        if let Some(message) = parsed.get("Message").and_then(|message| message.as_str()) {
            return (code, message.to_string());
        }
    }

    let message = if !body.trim().is_empty() {
        body.trim().to_string()
    } else if status.is_server_error() {
        "Server error".to_string()
    } else {
        DEFAULT_STATUS_MESSAGE.to_string()
    };
    ("Unknown".to_string(), message)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAppAttributesRequest<'a> {
    app_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAppAttributesResponse {
    #[serde(default)]
    apps: AppAttributeList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AppAttributeList {
    #[serde(default)]
    app_attribute: Vec<AppAttribute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AppAttribute {
    app_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeApiGroupsRequest<'a> {
    group_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeApiGroupsResponse {
    #[serde(default)]
    api_group_attributes: ApiGroupAttributeList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiGroupAttributeList {
    #[serde(default)]
    api_group_attribute: Vec<ApiGroupAttribute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiGroupAttribute {
    group_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeApisRequest<'a> {
    group_id: &'a str,
    api_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeApisResponse {
    #[serde(default)]
    api_summarys: ApiSummaryList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiSummaryList {
    #[serde(default)]
    api_summary: Vec<ApiSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiSummary {
    api_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SetApisAuthoritiesRequest<'a> {
    group_id: &'a str,
    app_id: &'a str,
    /// Comma-joined, the control plane's convention for list parameters.
    api_ids: String,
    duration: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SetApisAuthoritiesResponse {
    request_id: String,
}

impl GatewayClient for HttpGatewayClient {
    fn find_application(&self, app_name: &str) -> Result<Option<ApplicationId>, GatewayError> {
        let response: DescribeAppAttributesResponse =
            self.dispatch(ACTION_DESCRIBE_APPS, &DescribeAppAttributesRequest { app_name })?;

        Ok(response.apps.app_attribute.into_iter().next().map(|app| ApplicationId::new(app.app_id)))
    }

    fn find_group(&self, group_name: &str) -> Result<Option<GroupId>, GatewayError> {
        let response: DescribeApiGroupsResponse =
            self.dispatch(ACTION_DESCRIBE_GROUPS, &DescribeApiGroupsRequest { group_name })?;

        Ok(response
            .api_group_attributes
            .api_group_attribute
            .into_iter()
            .next()
            .map(|group| GroupId::new(group.group_id)))
    }

    fn find_api(&self, group_id: &GroupId, api_name: &str) -> Result<Option<ApiId>, GatewayError> {
        let request = DescribeApisRequest { group_id: group_id.as_str(), api_name };
        let response: DescribeApisResponse = self.dispatch(ACTION_DESCRIBE_APIS, &request)?;

        Ok(response.api_summarys.api_summary.into_iter().next().map(|api| ApiId::new(api.api_id)))
    }

    fn set_apis_authorities(
        &self,
        grant: &AccessGrant,
    ) -> Result<GrantAcknowledgement, GatewayError> {
        let api_ids = grant.api_ids.iter().map(ApiId::as_str).collect::<Vec<_>>().join(",");
        let request = SetApisAuthoritiesRequest {
            group_id: grant.group_id.as_str(),
            app_id: grant.application_id.as_str(),
            api_ids,
            duration: grant.duration.as_str(),
        };

        let response: SetApisAuthoritiesResponse =
            self.dispatch(ACTION_SET_AUTHORITIES, &request)?;

        Ok(GrantAcknowledgement { request_id: response.request_id })
    }
}
