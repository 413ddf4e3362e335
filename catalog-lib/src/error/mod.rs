//! Error types

mod api;
mod validation;

pub use api::*;
pub use validation::*;

/// Errors surfaced by the catalog client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from an API call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Failed to serialize a request payload.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns the field-level validation errors if this failure carried them.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Api(api) => api.validation(),
            _ => None,
        }
    }

    /// Returns `true` if the failure happened below the HTTP layer (no
    /// response was received at all).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_transport())
    }
}
