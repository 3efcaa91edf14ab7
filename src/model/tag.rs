use super::{CmaSystem, CmaType, Resource};
use serde::{Deserialize, Serialize};

/// A tag, addressed by a caller-chosen id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmaTag {
    pub sys: CmaSystem,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CmaTag {
    pub const VISIBILITY_PRIVATE: &'static str = "private";
    pub const VISIBILITY_PUBLIC: &'static str = "public";

    /// Create a private tag
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut sys = CmaSystem::new(CmaType::Tag);
        sys.id = Some(id.into());
        sys.visibility = Some(Self::VISIBILITY_PRIVATE.to_string());

        CmaTag {
            sys,
            name: Some(name.into()),
        }
    }

    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.sys.visibility = Some(visibility.into());
        self
    }

    pub fn visibility(&self) -> Option<&str> {
        self.sys.visibility.as_deref()
    }
}

impl Resource for CmaTag {
    fn system(&self) -> &CmaSystem {
        &self.sys
    }

    fn system_mut(&mut self) -> &mut CmaSystem {
        &mut self.sys
    }
}
