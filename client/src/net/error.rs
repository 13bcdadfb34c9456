//! Failure taxonomy for REST calls.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors returned by the REST helpers in [`crate::net::api`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never completed or the endpoint answered non-2xx.
    #[error("{message}")]
    NetworkFailure { status: Option<u16>, message: String },

    /// The requested service id does not exist.
    #[error("Service not found")]
    NotFound,

    /// The endpoint answered 2xx but the body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Map a non-2xx status into the taxonomy. 404 becomes [`ApiError::NotFound`].
    #[must_use]
    pub fn from_status(status: u16, action: &str) -> Self {
        if status == 404 {
            return Self::NotFound;
        }
        Self::NetworkFailure { status: Some(status), message: format!("{action} failed: {status}") }
    }

    /// Wrap a transport-level failure (no status available).
    #[must_use]
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::NetworkFailure { status: None, message: err.to_string() }
    }
}
