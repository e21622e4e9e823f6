mod authorizer;

pub use authorizer::Authorizer;
