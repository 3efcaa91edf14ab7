use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant carried in `sys.type` of every resource.
///
/// Types added to the API after this crate was built decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmaType {
    ApiKey,
    Array,
    Asset,
    ContentType,
    EditorInterface,
    Entry,
    Environment,
    Error,
    Link,
    Locale,
    Organization,
    OrganizationPeriodicUsage,
    SpacePeriodicUsage,
    PersonalAccessToken,
    PreviewApiKey,
    Role,
    Snapshot,
    Space,
    SpaceMembership,
    Tag,
    Upload,
    User,
    #[serde(rename = "Extension")]
    UiExtension,
    Webhook,
    WebhookCallOverview,
    WebhookDefinition,
    PreviewEnvironment,
    /// Any type name this crate does not know. The original name is not
    /// kept, so re-encoding writes `"Unknown"`. Decode through
    /// `CmaResource`, whose `Unknown` variant holds the raw JSON, when the
    /// name matters.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CmaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmaType::UiExtension => f.write_str("Extension"),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_wire_name() {
        assert_eq!(serde_json::to_string(&CmaType::UiExtension).unwrap(), r#""Extension""#);
        let parsed: CmaType = serde_json::from_str(r#""Extension""#).unwrap();
        assert_eq!(parsed, CmaType::UiExtension);
        assert_eq!(CmaType::UiExtension.to_string(), "Extension");
    }

    #[test]
    fn test_unknown_type() {
        let parsed: CmaType = serde_json::from_str(r#""TaxonomyConcept""#).unwrap();
        assert_eq!(parsed, CmaType::Unknown);
    }

    #[test]
    fn test_unknown_type_name_kept_by_resource() {
        let json = serde_json::json!({"sys": {"type": "TaxonomyConcept", "id": "c1"}});

        let tag: crate::model::CmaTag = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(tag.sys.resource_type, CmaType::Unknown);
        assert_eq!(serde_json::to_value(&tag).unwrap()["sys"]["type"], "Unknown");

        let resource: crate::model::CmaResource = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(resource.resource_type(), CmaType::Unknown);
        assert_eq!(serde_json::to_value(&resource).unwrap(), json);
    }
}
