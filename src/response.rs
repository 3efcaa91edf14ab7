use serde::{Deserialize, Serialize};
use serde_json::Value;

/// System block of an error body, e.g. `{"type": "Error", "id": "NotFound"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSys {
    #[serde(rename = "type")]
    pub error_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Structured error body returned by the API with any non-2xx status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub sys: ErrorSys,

    /// Human readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Per-field details, e.g. validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiErrorBody {
    /// Error code such as `NotFound`, `VersionMismatch` or `ValidationFailed`
    pub fn error_id(&self) -> Option<&str> {
        self.sys.id.as_deref()
    }

    /// Get a value from the details by a slash-separated path.
    /// For example, "errors/0/name" would access the name of the first field error.
    pub fn detail(&self, path: &str) -> Option<&Value> {
        let mut current = self.details.as_ref()?;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value from the details by a slash-separated path
    pub fn detail_string(&self, path: &str) -> Option<String> {
        self.detail(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_deserialization() {
        let json = r#"{
            "sys": {"type": "Error", "id": "ValidationFailed"},
            "message": "Validation error",
            "details": {"errors": [{"name": "required", "path": ["fields", "title"]}]},
            "requestId": "req-1"
        }"#;

        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error_id(), Some("ValidationFailed"));
        assert_eq!(body.request_id.as_deref(), Some("req-1"));
        assert_eq!(body.detail_string("errors/0/name"), Some("required".to_string()));
        assert_eq!(body.detail_string("errors/0/path/1"), Some("title".to_string()));
        assert!(body.detail("errors/3").is_none());
    }

    #[test]
    fn test_error_body_without_details() {
        let json = r#"{"sys": {"type": "Error", "id": "AccessTokenInvalid"}}"#;

        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert!(body.message.is_none());
        assert!(body.detail("anything").is_none());
    }
}
