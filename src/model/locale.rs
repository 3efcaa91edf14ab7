use super::{CmaSystem, CmaType, Resource};
use serde::{Deserialize, Serialize};

/// A locale of a space, e.g. `en-US`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmaLocale {
    pub sys: CmaSystem,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Locale whose values are used when this one has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_code: Option<String>,

    #[serde(default)]
    pub default: bool,

    /// Whether entries may leave fields of this locale empty
    #[serde(default)]
    pub optional: bool,
}

impl CmaLocale {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        CmaLocale {
            sys: CmaSystem::new(CmaType::Locale),
            name: Some(name.into()),
            code: Some(code.into()),
            fallback_code: None,
            default: false,
            optional: false,
        }
    }

    pub fn with_fallback_code(mut self, code: impl Into<String>) -> Self {
        self.fallback_code = Some(code.into());
        self
    }
}

impl Resource for CmaLocale {
    fn system(&self) -> &CmaSystem {
        &self.sys
    }

    fn system_mut(&mut self) -> &mut CmaSystem {
        &mut self.sys
    }
}
