//! Client error types.

use thiserror::Error;

/// Errors raised while talking to the remote API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No bearer token is attached to the session.
    #[error("Not authenticated. Call login first")]
    NotAuthenticated,

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote API answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Local file access failed (document upload).
    #[error("I/O error: {0}")]
    Io(String),
}

impl ClientError {
    /// True for a missing token as well as a remote 401 (expired token).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::NotAuthenticated) || self.status() == Some(401)
    }

    /// Remote status code, if the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_keeps_remote_body() {
        let err = ClientError::Api {
            status: 400,
            message: r#"{"code":"invalid_param"}"#.to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("400"));
        assert!(display.contains("invalid_param"));
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ClientError::NotAuthenticated.is_unauthorized());
        assert!(
            ClientError::Api {
                status: 401,
                message: "token expired".to_string()
            }
            .is_unauthorized()
        );
        assert!(
            !ClientError::Api {
                status: 403,
                message: "forbidden".to_string()
            }
            .is_unauthorized()
        );
        assert!(!ClientError::Network("refused".to_string()).is_unauthorized());
    }

    #[test]
    fn test_status() {
        let err = ClientError::Api {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ClientError::NotAuthenticated.status(), None);
    }
}
