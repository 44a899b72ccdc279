use thiserror::Error;

use crate::api_error::ApiError;

/// Boxed error produced by an [`HttpExecutor`](crate::transport::HttpExecutor).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by every public operation of the client.
#[derive(Debug, Error)]
pub enum Error {
    /// An enumerated input failed its membership check; no request was sent.
    #[error("invalid {param}: '{value}'")]
    InvalidParameter { param: &'static str, value: String },

    /// The configured base URL could not be turned into a request URL.
    #[error("failed to build request URL: {0}")]
    InvalidRequest(String),

    /// The network call itself could not complete.
    #[error("the HTTP request execution failed: {0}")]
    Transport(#[source] BoxError),

    /// The request completed but the service answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("response carried no body")]
    MissingBody,

    #[error("malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("request was cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    pub(crate) fn invalid(param: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidParameter {
            param,
            value: value.into(),
        }
    }

    /// HTTP status behind this error, `0` when the request never produced one.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Api(api) => api.status,
            _ => 0,
        }
    }

    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Error::MissingBody | Error::MalformedResponse(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
