use super::{CmaLink, CmaType};
use serde::{Deserialize, Serialize};

/// Auxiliary resource metadata holding tag links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CmaMetadata {
    #[serde(default)]
    tags: Vec<CmaLink>,
}

impl CmaMetadata {
    pub fn new() -> Self {
        CmaMetadata::default()
    }

    pub fn tags(&self) -> &[CmaLink] {
        &self.tags
    }

    /// Link a tag, ignoring ids that are already linked
    pub fn add_tag(&mut self, tag_id: impl Into<String>) {
        let tag_id = tag_id.into();
        if !self.has_tag(&tag_id) {
            self.tags.push(CmaLink::new(CmaType::Tag, tag_id));
        }
    }

    /// Remove a tag link; returns whether it was present
    pub fn remove_tag(&mut self, tag_id: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|link| link.id() != tag_id);
        self.tags.len() != before
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|link| link.id() == tag_id)
    }
}
