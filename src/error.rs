/// Error types for backend communication
use thiserror::Error;

/// Failure talking to the summary/chat backend.
///
/// `Display` yields the bare message; callers add their own prefix and hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Request never completed (backend down, CORS, offline)
    #[error("{0}")]
    Network(String),

    /// Response body was not the JSON we expected
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    InvalidEndpoint(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<gloo_net::Error> for BackendError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            // fetch rejections carry "TypeError: ..." in their string form; keep the bare message
            gloo_net::Error::JsError(e) => BackendError::Network(e.message),
            gloo_net::Error::SerdeError(e) => BackendError::Decode(e.to_string()),
            other => BackendError::Network(other.to_string()),
        }
    }
}

impl From<url::ParseError> for BackendError {
    fn from(error: url::ParseError) -> Self {
        BackendError::InvalidEndpoint(format!("Invalid backend address: {}", error))
    }
}
