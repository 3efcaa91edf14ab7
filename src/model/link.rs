use super::CmaType;
use serde::{Deserialize, Serialize};

/// `sys` block of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    /// Always [`CmaType::Link`]
    #[serde(rename = "type")]
    pub sys_type: CmaType,
    pub link_type: CmaType,
    pub id: String,
}

/// Reference to another resource by type and id.
///
/// Wire shape: `{"sys": {"type": "Link", "linkType": "Environment", "id": "master"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmaLink {
    pub sys: LinkSys,
}

impl CmaLink {
    pub fn new(link_type: CmaType, id: impl Into<String>) -> Self {
        CmaLink {
            sys: LinkSys {
                sys_type: CmaType::Link,
                link_type,
                id: id.into(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn link_type(&self) -> CmaType {
        self.sys.link_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_wire_shape() {
        let link = CmaLink::new(CmaType::Environment, "master");
        let value = serde_json::to_value(&link).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"sys": {"type": "Link", "linkType": "Environment", "id": "master"}})
        );
        assert_eq!(serde_json::from_value::<CmaLink>(value).unwrap(), link);
    }
}
