use super::{CmaLink, CmaMetadata, CmaSystem, CmaType, Resource};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field values keyed by field id, then by locale code
pub type Fields = IndexMap<String, IndexMap<String, Value>>;

/// An entry of some content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmaEntry {
    pub sys: CmaSystem,

    #[serde(default)]
    pub fields: Fields,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CmaMetadata>,
}

impl CmaEntry {
    pub fn new() -> Self {
        CmaEntry {
            sys: CmaSystem::new(CmaType::Entry),
            fields: Fields::new(),
            metadata: None,
        }
    }

    pub fn field(&self, key: &str, locale: &str) -> Option<&Value> {
        self.fields.get(key).and_then(|locales| locales.get(locale))
    }

    pub fn set_field(&mut self, key: impl Into<String>, locale: impl Into<String>, value: Value) -> &mut Self {
        self.fields
            .entry(key.into())
            .or_default()
            .insert(locale.into(), value);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, locale: impl Into<String>, value: Value) -> Self {
        self.set_field(key, locale, value);
        self
    }

    pub fn metadata(&self) -> Option<&CmaMetadata> {
        self.metadata.as_ref()
    }

    /// Metadata of this entry, created empty on first use
    pub fn metadata_mut(&mut self) -> &mut CmaMetadata {
        self.metadata.get_or_insert_with(CmaMetadata::new)
    }

    pub fn content_type_id(&self) -> Option<&str> {
        self.sys.content_type.as_ref().map(CmaLink::id)
    }

    pub fn is_published(&self) -> bool {
        self.sys.published_version.is_some()
    }
}

impl Default for CmaEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for CmaEntry {
    fn system(&self) -> &CmaSystem {
        &self.sys
    }

    fn system_mut(&mut self) -> &mut CmaSystem {
        &mut self.sys
    }
}
