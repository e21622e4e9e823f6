pub mod context;
pub mod error;
pub mod identifiers;

pub use context::{ResolutionContext, ResolvedIdentifiers};
pub use error::{GatewayError, GrantError};
pub use identifiers::{ApiId, ApplicationId, GroupId};
