//! Fetch error types

use thiserror::Error;

/// Errors that can occur during an instrumented fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// The HTTP status code, if the backend answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Network(e) => e.status().map(|s| s.as_u16()),
            FetchError::Json(_) => None,
        }
    }

    /// Check if this is a transport-level failure (never reached the backend)
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_http_error() {
        let err = FetchError::Status {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_network());
    }

    #[test]
    fn test_status_for_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = FetchError::Json(json_err);
        assert_eq!(err.status(), None);
        assert!(!err.is_network());
    }

    #[test]
    fn test_display_includes_status() {
        let err = FetchError::Status {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404: not found");
    }
}
