use thiserror::Error;

/// Failure raised at the transport boundary of the gateway control plane.
///
/// Kept separate from [`GrantError`] so workflow errors can carry the
/// underlying service failure as an inspectable source instead of a
/// flattened message.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (connect, TLS, timeout).
    #[error("request to gateway failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request body could not be encoded.
    #[error("failed to encode gateway request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("gateway returned status {status} ({code}): {message}")]
    Service { status: u16, code: String, message: String },

    /// A success response could not be decoded into the expected shape.
    #[error("could not decode gateway response (status {status}): {message}")]
    InvalidResponse { status: u16, message: String },
}

/// Failure of the grant workflow, tagged with the operation and the
/// human-chosen name it was working on.
#[derive(Debug, Error)]
pub enum GrantError {
    /// The application lookup call failed.
    #[error("looking up application '{name}' failed")]
    ApplicationLookup {
        name: String,
        #[source]
        source: GatewayError,
    },

    /// The application lookup returned zero matches.
    #[error("no application named '{name}' is registered on the gateway")]
    ApplicationNotFound { name: String },

    /// The API-group lookup call failed.
    #[error("looking up API group '{name}' failed")]
    GroupLookup {
        name: String,
        #[source]
        source: GatewayError,
    },

    /// The API-group lookup returned zero matches.
    #[error("no API group named '{name}' exists on the gateway")]
    GroupNotFound { name: String },

    /// A per-API lookup call failed.
    #[error("looking up API '{name}' failed")]
    ApiLookup {
        name: String,
        #[source]
        source: GatewayError,
    },

    /// A per-API lookup returned zero matches within the group.
    #[error("no API named '{name}' exists in the resolved group")]
    ApiNotFound { name: String },

    /// The authorization call itself was rejected.
    #[error("authorization request was rejected by the gateway")]
    Authorization {
        #[source]
        source: GatewayError,
    },

    /// A required credential environment variable is absent or blank.
    #[error("environment variable '{0}' is not set")]
    MissingCredential(String),

    /// The endpoint could not be parsed or uses an unsupported scheme.
    #[error("invalid gateway endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A required name was empty before any remote call was made.
    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    /// Other configuration issue.
    #[error("{0}")]
    Configuration(String),
}

impl GrantError {
    pub(crate) fn config_error<S: Into<String>>(message: S) -> Self {
        GrantError::Configuration(message.into())
    }

    /// Process exit status for this failure kind, for operational scripting.
    ///
    /// 2 is left to clap usage errors; 1 is unused so a panic cannot be
    /// mistaken for a classified failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            GrantError::ApplicationLookup { .. } | GrantError::ApplicationNotFound { .. } => 3,
            GrantError::GroupLookup { .. } | GrantError::GroupNotFound { .. } => 4,
            GrantError::ApiLookup { .. } | GrantError::ApiNotFound { .. } => 5,
            GrantError::Authorization { .. } => 6,
            GrantError::MissingCredential(_)
            | GrantError::InvalidEndpoint { .. }
            | GrantError::EmptyName(_)
            | GrantError::Configuration(_) => 7,
        }
    }
}
