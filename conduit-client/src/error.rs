//! Error types for the Conduit clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the job server or the relay
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Remote side returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the remote side
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Status code of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let unauthorized = ClientError::api_error(401, "bad credentials");
        assert!(unauthorized.is_client_error());
        assert!(!unauthorized.is_server_error());
        assert_eq!(unauthorized.status(), Some(401));

        let gateway = ClientError::api_error(502, "upstream down");
        assert!(gateway.is_server_error());

        let parse = ClientError::ParseError("eof".to_string());
        assert_eq!(parse.status(), None);
        assert!(!parse.is_client_error());
    }
}
