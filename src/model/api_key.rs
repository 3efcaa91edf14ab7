use super::{CmaLink, CmaSystem, CmaType, Resource};
use serde::{Deserialize, Serialize};

/// A delivery API key of a space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmaApiKey {
    pub sys: CmaSystem,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Read only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Read only
    #[serde(rename = "preview_api_key", skip_serializing_if = "Option::is_none")]
    pub preview_api_key: Option<CmaLink>,

    #[serde(default)]
    pub environments: Vec<CmaLink>,
}

impl CmaApiKey {
    pub fn new(name: impl Into<String>) -> Self {
        CmaApiKey {
            sys: CmaSystem::new(CmaType::ApiKey),
            name: Some(name.into()),
            description: None,
            access_token: None,
            preview_api_key: None,
            environments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Grant this key access to an environment
    pub fn add_environment(&mut self, environment_id: impl Into<String>) -> &mut Self {
        self.environments
            .push(CmaLink::new(CmaType::Environment, environment_id));
        self
    }
}

impl Resource for CmaApiKey {
    fn system(&self) -> &CmaSystem {
        &self.sys
    }

    fn system_mut(&mut self) -> &mut CmaSystem {
        &mut self.sys
    }
}
