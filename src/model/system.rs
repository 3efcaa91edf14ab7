use super::{CmaLink, CmaType};
use crate::time::Time;
use serde::{Deserialize, Serialize};

/// Identity and version metadata shared by every resource (`sys`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmaSystem {
    #[serde(rename = "type")]
    pub resource_type: CmaType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Time>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Time>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Time>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<Time>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_version: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CmaLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<CmaLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<CmaLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<CmaLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<CmaLink>,

    /// Only set on tags: `private` or `public`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

impl CmaSystem {
    pub fn new(resource_type: CmaType) -> Self {
        CmaSystem {
            resource_type,
            id: None,
            version: None,
            created_at: None,
            updated_at: None,
            published_at: None,
            archived_at: None,
            published_version: None,
            created_by: None,
            updated_by: None,
            space: None,
            environment: None,
            content_type: None,
            visibility: None,
        }
    }
}

/// Common accessors for anything carrying a `sys` block
pub trait Resource {
    fn system(&self) -> &CmaSystem;

    fn system_mut(&mut self) -> &mut CmaSystem;

    fn id(&self) -> Option<&str> {
        self.system().id.as_deref()
    }

    fn version(&self) -> Option<i64> {
        self.system().version
    }

    fn resource_type(&self) -> CmaType {
        self.system().resource_type
    }

    fn set_id(&mut self, id: impl Into<String>)
    where
        Self: Sized,
    {
        self.system_mut().id = Some(id.into());
    }

    fn set_version(&mut self, version: i64) {
        self.system_mut().version = Some(version);
    }

    /// Id of the space this resource lives in
    fn space_id(&self) -> Option<&str> {
        self.system().space.as_ref().map(CmaLink::id)
    }

    /// Id of the environment this resource lives in
    fn environment_id(&self) -> Option<&str> {
        self.system().environment.as_ref().map(CmaLink::id)
    }

    /// Link pointing at this resource, if it has an id
    fn link(&self) -> Option<CmaLink> {
        self.id().map(|id| CmaLink::new(self.resource_type(), id))
    }
}
