use thiserror::Error;

/// Errors produced by the remote theme API.
///
/// Variants carry enough context (operation, URL, backend error code) for the
/// engine to log precisely while deciding between silent degradation and a
/// user-visible failure. Passive reads degrade to cached data; only writes
/// propagate these to callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client initialization failed.
    #[error("HTTP client creation failed: {reason}")]
    ClientCreation { reason: String },

    /// Request execution failed before a response was received.
    #[error("Request failed: {url} - {reason}")]
    RequestFailed { url: String, reason: String },

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {seconds}s: {url}")]
    Timeout { url: String, seconds: u64 },

    /// The backend rejected the credentials attached to the request.
    ///
    /// Token acquisition and refresh are the host application's concern;
    /// the engine treats this as a failed operation, not a trigger to
    /// re-authenticate.
    #[error("Not authorized during {operation}")]
    Unauthorized { operation: String },

    /// The requested resource does not exist.
    ///
    /// `GET user/active-theme` answers 404 for users without an assignment,
    /// so callers map this variant to "absent" rather than failing.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Structured error reported by the backend.
    #[error("Backend error during {operation}: {code} (HTTP {status_code}) - {message}")]
    Backend {
        operation: String,
        code: String,
        status_code: u16,
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Invalid response: expected {expected}, got {actual}")]
    InvalidResponse { expected: String, actual: String },
}

impl ApiError {
    /// Extract backend error details from a non-success response.
    ///
    /// Tries the backend's structured `{"error": {"code", "message"}}` body
    /// first and falls back to the raw text when the body is not JSON.
    pub async fn from_error_response(
        response: reqwest::Response,
        operation: impl Into<String>,
    ) -> Self {
        let operation = operation.into();
        let status = response.status();
        let status_code = status.as_u16();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Self::Unauthorized { operation };
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Self::NotFound {
                resource: operation,
            };
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(backend_error) = serde_json::from_str::<BackendErrorResponse>(&body) {
                    Self::Backend {
                        operation,
                        code: backend_error.error.code,
                        status_code,
                        message: backend_error.error.message,
                    }
                } else {
                    Self::Backend {
                        operation,
                        code: format!("HTTP_{status_code}"),
                        status_code,
                        message: if body.is_empty() {
                            format!("HTTP {status_code} error")
                        } else {
                            body
                        },
                    }
                }
            }
            Err(_) => Self::Backend {
                operation,
                code: format!("HTTP_{status_code}"),
                status_code,
                message: format!("HTTP {status_code} error - unable to read response body"),
            },
        }
    }

    /// True when the error means "the resource is absent", not "the call broke".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Backend error code, if the backend reported one.
    pub fn backend_code(&self) -> Option<&str> {
        match self {
            ApiError::Backend { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Backend error response format.
#[derive(Debug, serde::Deserialize)]
struct BackendErrorResponse {
    error: BackendErrorDetails,
}

#[derive(Debug, serde::Deserialize)]
struct BackendErrorDetails {
    code: String,
    message: String,
}

// Result type alias for convenience
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_body_parses() {
        let body = r#"{"error": {"code": "ThemeNotFound", "message": "unknown template"}}"#;
        let parsed: BackendErrorResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.error.code, "ThemeNotFound");
        assert_eq!(parsed.error.message, "unknown template");
    }

    #[test]
    fn test_not_found_classification() {
        let err = ApiError::NotFound {
            resource: "active theme".to_string(),
        };
        assert!(err.is_not_found());
        assert!(
            !ApiError::RequestFailed {
                url: "http://x".to_string(),
                reason: "boom".to_string(),
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_backend_code_accessor() {
        let err = ApiError::Backend {
            operation: "set_active_theme".to_string(),
            code: "ScopeConflict".to_string(),
            status_code: 409,
            message: "assignment exists".to_string(),
        };
        assert_eq!(err.backend_code(), Some("ScopeConflict"));
        assert_eq!(
            err.to_string(),
            "Backend error during set_active_theme: ScopeConflict (HTTP 409) - assignment exists"
        );
    }
}
