use super::{
    CmaApiKey, CmaEntry, CmaLocale, CmaPersonalAccessToken, CmaSpace, CmaSystem, CmaTag, CmaType, Resource,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Any resource, dispatched on its `sys.type` discriminant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CmaResource {
    Space(CmaSpace),
    Tag(CmaTag),
    PersonalAccessToken(CmaPersonalAccessToken),
    ApiKey(CmaApiKey),
    Entry(CmaEntry),
    Locale(CmaLocale),
    /// A resource type this crate has no model for, kept verbatim
    Unknown(Value),
}

impl CmaResource {
    pub fn resource_type(&self) -> CmaType {
        match self.system() {
            Some(sys) => sys.resource_type,
            None => CmaType::Unknown,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            CmaResource::Unknown(value) => value.pointer("/sys/id").and_then(Value::as_str),
            _ => self.system().and_then(|sys| sys.id.as_deref()),
        }
    }

    /// The modelled `sys` block; `None` for unknown resources
    pub fn system(&self) -> Option<&CmaSystem> {
        match self {
            CmaResource::Space(r) => Some(r.system()),
            CmaResource::Tag(r) => Some(r.system()),
            CmaResource::PersonalAccessToken(r) => Some(r.system()),
            CmaResource::ApiKey(r) => Some(r.system()),
            CmaResource::Entry(r) => Some(r.system()),
            CmaResource::Locale(r) => Some(r.system()),
            CmaResource::Unknown(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for CmaResource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let discriminant = value
            .pointer("/sys/type")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("sys.type"))?;

        let resource = match discriminant {
            "Space" => CmaResource::Space(serde_json::from_value(value).map_err(D::Error::custom)?),
            "Tag" => CmaResource::Tag(serde_json::from_value(value).map_err(D::Error::custom)?),
            "PersonalAccessToken" => {
                CmaResource::PersonalAccessToken(serde_json::from_value(value).map_err(D::Error::custom)?)
            }
            "ApiKey" => CmaResource::ApiKey(serde_json::from_value(value).map_err(D::Error::custom)?),
            "Entry" => CmaResource::Entry(serde_json::from_value(value).map_err(D::Error::custom)?),
            "Locale" => CmaResource::Locale(serde_json::from_value(value).map_err(D::Error::custom)?),
            _ => CmaResource::Unknown(value),
        };

        Ok(resource)
    }
}
