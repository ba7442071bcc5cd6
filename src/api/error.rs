//! API Error Types
//!
//! Failures of a single backend call. Read paths absorb these by falling back
//! to the snapshot cache; write paths surface them to the user.

use thiserror::Error;

/// Errors that can occur when calling the expense backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection refused, DNS failure, CORS rejection and the like
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the configured timeout
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// Non-2xx response; the message is the response body text
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Parse error: {0}")]
    Decode(String),

    /// Request body could not be serialized
    #[error("Request build error: {0}")]
    Encode(String),

    /// Base address or path produced an unusable URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_shows_body() {
        let err = ApiError::Status {
            status: 400,
            message: r#"{"errors": {"title": "This field is required."}}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"{"errors": {"title": "This field is required."}}"#);
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::Timeout(5000).to_string(), "Request timed out after 5000 ms");
        assert_eq!(
            ApiError::Network("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(ApiError::Network(String::new()).status(), None);
    }
}
