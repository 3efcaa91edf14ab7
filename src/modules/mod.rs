//! One module per resource family.
//!
//! Modules validate identifiers, bind them into an [`Endpoint`] declared in
//! their `service` submodule and execute it through the shared
//! [`RestContext`]. Each exposes the same operations through an async
//! counterpart that reports to a [`Callback`].
//!
//! [`Endpoint`]: crate::endpoint::Endpoint
//! [`Callback`]: crate::callback::Callback

mod api_keys;
mod entries;
mod personal_access_tokens;
mod spaces;
mod tags;

pub use api_keys::{AsyncApiKeys, ModuleApiKeys};
pub use entries::{AsyncEntries, ModuleEntries};
pub use personal_access_tokens::{AsyncPersonalAccessTokens, ModulePersonalAccessTokens};
pub use spaces::{AsyncSpaces, ModuleSpaces};
pub use tags::{AsyncTags, ModuleTags};

use crate::callback::AsyncBridge;
use crate::error::{CmaError, Result};
use crate::rest::RestContext;

/// Carries the resource version for optimistic concurrency checks
pub const HEADER_VERSION: &str = "X-Contentful-Version";
/// Organization a new space is created in
pub const HEADER_ORGANIZATION: &str = "X-Contentful-Organization";
/// Content type of a new entry
pub const HEADER_CONTENT_TYPE: &str = "X-Contentful-Content-Type";

/// State shared by every module of one client
#[derive(Debug)]
pub struct ModuleContext {
    pub rest: RestContext,
    pub bridge: AsyncBridge,
    pub space_id: Option<String>,
    pub environment_id: Option<String>,
}

impl ModuleContext {
    pub(crate) fn configured_space_id(&self) -> Result<&str> {
        require(self.space_id.as_deref(), "spaceId")
    }

    pub(crate) fn configured_environment_id(&self) -> Result<&str> {
        require(self.environment_id.as_deref(), "environmentId")
    }
}

/// Reject a missing or empty identifier before any request is built
pub(crate) fn require<'a>(value: impl Into<Option<&'a str>>, parameter: &'static str) -> Result<&'a str> {
    match value.into() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CmaError::validation(parameter)),
    }
}

/// Reject a resource without a version
pub(crate) fn require_version(version: Option<i64>) -> Result<i64> {
    version.ok_or(CmaError::validation("version"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require("abc", "spaceId").unwrap(), "abc");
        assert!(matches!(
            require(None::<&str>, "spaceId"),
            Err(CmaError::Validation { parameter: "spaceId" })
        ));
        assert!(matches!(
            require("", "environmentId"),
            Err(CmaError::Validation { parameter: "environmentId" })
        ));
    }

    #[test]
    fn test_require_version() {
        assert_eq!(require_version(Some(3)).unwrap(), 3);
        assert!(matches!(
            require_version(None),
            Err(CmaError::Validation { parameter: "version" })
        ));
    }
}
