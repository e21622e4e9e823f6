//! Gateway endpoint configuration and credential loading.

use std::fmt;

use url::Url;

use crate::domain::GrantError;

/// Environment variable holding the access key identifier.
pub const ACCESS_KEY_ID_VAR: &str = "access_key_id";
/// Environment variable holding the access key secret.
pub const ACCESS_KEY_SECRET_VAR: &str = "access_key_secret";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Access key pair for the gateway control plane.
///
/// Read once at startup and immutable for the process lifetime. The secret
/// is only ever used to sign requests; it is never logged or sent on the
/// wire.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub access_key_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Read the key pair from the process environment.
    pub fn from_env() -> Result<Self, GrantError> {
        Ok(Self {
            access_key_id: require_env(ACCESS_KEY_ID_VAR)?,
            access_key_secret: require_env(ACCESS_KEY_SECRET_VAR)?,
        })
    }
}

fn require_env(name: &str) -> Result<String, GrantError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(GrantError::MissingCredential(name.to_string())),
    }
}

/// Connection configuration for the gateway control plane.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Service endpoint, e.g. `https://apigateway.cn-hangzhou.aliyuncs.com/`.
    pub endpoint: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Build a configuration with the default timeout.
    ///
    /// A bare host such as `apigateway.cn-hangzhou.aliyuncs.com` is accepted
    /// and normalized to `https://`.
    pub fn for_endpoint(endpoint: &str) -> Result<Self, GrantError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT_SECS)
    }

    /// Build a configuration with an explicit timeout.
    pub fn with_timeout(endpoint: &str, timeout_secs: u64) -> Result<Self, GrantError> {
        let trimmed = endpoint.trim();
        if trimmed.is_empty() {
            return Err(GrantError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "endpoint must not be empty".to_string(),
            });
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };
        let endpoint = Url::parse(&candidate).map_err(|e| GrantError::InvalidEndpoint {
            endpoint: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        let config = Self { endpoint, timeout_secs };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GrantError> {
        if self.timeout_secs == 0 {
            return Err(GrantError::config_error("timeout_secs must be greater than 0"));
        }
        match self.endpoint.scheme() {
            "http" | "https" => Ok(()),
            other => Err(GrantError::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}
