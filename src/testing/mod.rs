pub mod fake_gateway_client;

pub use fake_gateway_client::{FakeGatewayClient, RecordedCall};
