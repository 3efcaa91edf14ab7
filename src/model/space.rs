use super::{CmaSystem, CmaType, Resource};
use serde::{Deserialize, Serialize};

/// A space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmaSpace {
    pub sys: CmaSystem,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Only honored on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

impl CmaSpace {
    pub fn new() -> Self {
        CmaSpace {
            sys: CmaSystem::new(CmaType::Space),
            name: None,
            default_locale: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }
}

impl Default for CmaSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for CmaSpace {
    fn system(&self) -> &CmaSystem {
        &self.sys
    }

    fn system_mut(&mut self) -> &mut CmaSystem {
        &mut self.sys
    }

    /// A space is its own space
    fn space_id(&self) -> Option<&str> {
        self.id()
    }
}
