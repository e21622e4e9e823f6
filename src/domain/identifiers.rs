//! Opaque identifiers assigned by the gateway control plane.
//!
//! Identifiers are service-generated and distinct from the human-chosen
//! names they were resolved from; the newtypes keep them from being
//! swapped at a call site.

use std::fmt;

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

opaque_id!(
    /// Identifier of a registered application (a consumer identity).
    ApplicationId
);

opaque_id!(
    /// Identifier of an API group.
    GroupId
);

opaque_id!(
    /// Identifier of a single API route within a group.
    ApiId
);
