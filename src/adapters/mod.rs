mod gateway_client_http;

pub use gateway_client_http::HttpGatewayClient;
