use crate::response::ApiErrorBody;
use thiserror::Error;

/// Main error type for Content Management API operations
#[derive(Debug, Error)]
pub enum CmaError {
    /// A required identifying parameter was missing; no request was sent
    #[error("{parameter} may not be null")]
    Validation { parameter: &'static str },

    /// The request never received a response
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<ApiErrorBody>,
        body: String,
        request_id: Option<String>,
    },

    /// The response body did not match the expected resource shape
    #[error("failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Request body serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error, e.g. failing to spawn executor threads
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of a [`CmaError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Api,
    Decode,
    Other,
}

impl From<reqwest::Error> for CmaError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };

        CmaError::Transport {
            message,
            source: Some(Box::new(err)),
        }
    }
}

impl CmaError {
    /// Create a validation error for the named parameter
    pub fn validation(parameter: &'static str) -> Self {
        CmaError::Validation { parameter }
    }

    /// Create a transport error without an underlying source
    pub fn transport(message: impl Into<String>) -> Self {
        CmaError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create an API error from the raw status and body of a failed response.
    ///
    /// The body is decoded into an [`ApiErrorBody`] when it has that shape;
    /// otherwise only the status and raw body are kept.
    pub fn from_status(status: u16, body: &[u8], request_id: Option<String>) -> Self {
        let raw = String::from_utf8_lossy(body).to_string();
        let details: Option<ApiErrorBody> = serde_json::from_slice(body).ok();

        let message = details
            .as_ref()
            .and_then(|d| d.message.clone().or_else(|| d.error_id().map(str::to_string)))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    format!("HTTP status {}", status)
                } else {
                    raw.clone()
                }
            });

        let request_id = request_id.or_else(|| details.as_ref().and_then(|d| d.request_id.clone()));

        CmaError::Api {
            status,
            message,
            details,
            body: raw,
            request_id,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CmaError::Validation { .. } => ErrorKind::Validation,
            CmaError::Transport { .. } => ErrorKind::Transport,
            CmaError::Api { .. } => ErrorKind::Api,
            CmaError::Decode { .. } => ErrorKind::Decode,
            _ => ErrorKind::Other,
        }
    }

    /// Get the HTTP status code if this is an API error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CmaError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the decoded error body if the server sent one
    pub fn api_error(&self) -> Option<&ApiErrorBody> {
        match self {
            CmaError::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_permission_denied(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Check if the server rejected an update for a stale version (409)
    pub fn is_version_mismatch(&self) -> bool {
        self.status_code() == Some(409)
    }

    /// Check if the request was rate limited (429)
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }
}

/// Result type for CMA operations
pub type Result<T> = std::result::Result<T, CmaError>;
