//! Error types for API and token storage operations

/// Errors from API calls and token storage.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid API response: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

impl Error {
    /// Human-readable failure detail for the account log.
    ///
    /// For `Api` errors the upstream body is pretty-printed when it parses
    /// as JSON, so structured error payloads stay diagnosable. Everything
    /// else falls back to the Display form.
    pub fn detail(&self) -> String {
        match self {
            Error::Api { body, .. } => match serde_json::from_str::<serde_json::Value>(body) {
                Ok(value) => {
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.clone())
                }
                Err(_) => body.clone(),
            },
            other => other.to_string(),
        }
    }
}

/// Result alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = Error::Api {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "API returned 500: boom");
    }

    #[test]
    fn detail_pretty_prints_json_body() {
        let err = Error::Api {
            status: 401,
            body: r#"{"code":401,"message":"Unauthorized"}"#.into(),
        };
        let detail = err.detail();
        assert!(detail.contains("\"message\": \"Unauthorized\""), "got: {detail}");
        assert!(detail.contains('\n'), "expected multi-line pretty output");
    }

    #[test]
    fn detail_keeps_non_json_body_verbatim() {
        let err = Error::Api {
            status: 502,
            body: "<html>bad gateway</html>".into(),
        };
        assert_eq!(err.detail(), "<html>bad gateway</html>");
    }

    #[test]
    fn detail_of_transport_error_is_display_form() {
        let err = Error::Http("connection refused".into());
        assert_eq!(err.detail(), "HTTP request failed: connection refused");
    }
}
