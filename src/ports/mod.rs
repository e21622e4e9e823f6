mod gateway_client;

pub use gateway_client::{AccessGrant, GatewayClient, GrantAcknowledgement, GrantDuration};
