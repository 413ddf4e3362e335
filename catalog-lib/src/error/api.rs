//! API error types

use std::time::Duration;

use super::ValidationErrors;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Field-level validation errors, when the body had that shape.
        errors: Option<ValidationErrors>,
    },

    /// Network error during the API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse an API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// Creates a new HTTP error carrying a field validation map.
    pub fn http_with_errors(status: u16, message: impl Into<String>, errors: ValidationErrors) -> Self {
        Self::Http {
            status,
            message: message.into(),
            errors: Some(errors),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the field validation map if the response carried one.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Http { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if no HTTP response was received (network fault or
    /// timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}
