use super::{CmaSystem, CmaType, Resource};
use crate::time::Time;
use serde::{Deserialize, Serialize};

/// Permission granted to a personal access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "content_management_read")]
    Read,
    #[serde(rename = "content_management_manage")]
    Manage,
}

/// A personal access token of the current user.
///
/// The secret `token` value is only returned by the create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmaPersonalAccessToken {
    pub sys: CmaSystem,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub scopes: Vec<Scope>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<Time>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl CmaPersonalAccessToken {
    pub fn new(name: impl Into<String>) -> Self {
        CmaPersonalAccessToken {
            sys: CmaSystem::new(CmaType::PersonalAccessToken),
            name: Some(name.into()),
            scopes: Vec::new(),
            revoked_at: None,
            token: None,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

impl Resource for CmaPersonalAccessToken {
    fn system(&self) -> &CmaSystem {
        &self.sys
    }

    fn system_mut(&mut self) -> &mut CmaSystem {
        &mut self.sys
    }
}
