//! Classification of non-success HTTP statuses returned by the API.

use std::fmt;

/// Category of a failed API call, derived from the HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Unknown,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    RequestTimedOut,
    Conflict,
    Gone,
    LengthRequired,
    PayloadTooLarge,
    UriTooLong,
    UnsupportedMediaType,
    ExpectationFailed,
    TooManyRequests,
    Server,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
}

/// Status code -> kind. Anything not listed here is [`ApiErrorKind::Unknown`].
pub const STATUS_TABLE: &[(u16, ApiErrorKind)] = &[
    (400, ApiErrorKind::BadRequest),
    (401, ApiErrorKind::Unauthorized),
    (403, ApiErrorKind::Forbidden),
    (404, ApiErrorKind::NotFound),
    (405, ApiErrorKind::MethodNotAllowed),
    (406, ApiErrorKind::NotAcceptable),
    (408, ApiErrorKind::RequestTimedOut),
    (409, ApiErrorKind::Conflict),
    (410, ApiErrorKind::Gone),
    (411, ApiErrorKind::LengthRequired),
    (413, ApiErrorKind::PayloadTooLarge),
    (414, ApiErrorKind::UriTooLong),
    (415, ApiErrorKind::UnsupportedMediaType),
    (417, ApiErrorKind::ExpectationFailed),
    (429, ApiErrorKind::TooManyRequests),
    (500, ApiErrorKind::Server),
    (502, ApiErrorKind::BadGateway),
    (503, ApiErrorKind::ServiceUnavailable),
    (504, ApiErrorKind::GatewayTimeout),
];

impl ApiErrorKind {
    /// Look up the kind for a status code; `None` means no response was available.
    pub fn from_status(status: Option<u16>) -> Self {
        status
            .and_then(|code| {
                STATUS_TABLE
                    .iter()
                    .find(|(known, _)| *known == code)
                    .map(|(_, kind)| *kind)
            })
            .unwrap_or(ApiErrorKind::Unknown)
    }

    /// Fixed human-readable text, for display only.
    pub fn description(&self) -> &'static str {
        match self {
            ApiErrorKind::BadRequest => {
                "Bad request. Invalid syntax when requesting resource from server."
            }
            ApiErrorKind::Unauthorized => {
                "Unauthorized. Trying to access API endpoints with an invalid request signature or access token."
            }
            ApiErrorKind::Forbidden => {
                "Forbidden. Trying to obtain an access token with incorrect client credentials."
            }
            ApiErrorKind::NotFound => {
                "Not found. Trying to access a non-existent endpoint or resource."
            }
            ApiErrorKind::MethodNotAllowed => {
                "Method not allowed. The endpoint exists but does not support the request method."
            }
            ApiErrorKind::NotAcceptable => {
                "Not acceptable. The requested content type is not available for this resource."
            }
            ApiErrorKind::RequestTimedOut => {
                "Request timed out. The server did not receive a complete request message in time."
            }
            ApiErrorKind::Conflict => {
                "Conflict. The request conflicts with the current state of the resource."
            }
            ApiErrorKind::Gone => {
                "Gone. Access to the target resource is no longer available."
            }
            ApiErrorKind::LengthRequired => {
                "Length required. The server refuses the request without a defined Content-Length."
            }
            ApiErrorKind::PayloadTooLarge => {
                "Payload too large. The request payload is larger than the server is willing to process."
            }
            ApiErrorKind::UriTooLong => {
                "URI too long. The request target is longer than the server is willing to interpret."
            }
            ApiErrorKind::UnsupportedMediaType => {
                "Unsupported media type. The payload format is not supported by the target resource."
            }
            ApiErrorKind::ExpectationFailed => {
                "Expectation failed. The Expect request header could not be met."
            }
            ApiErrorKind::TooManyRequests => {
                "Too many requests. The rate limit has been exceeded, back off before retrying."
            }
            ApiErrorKind::Server => {
                "Server error. An internal error occurred, retry after waiting a short amount of time."
            }
            ApiErrorKind::BadGateway => {
                "Bad gateway. Temporary internal networking problem."
            }
            ApiErrorKind::ServiceUnavailable => {
                "Service unavailable. The service is temporarily overloaded."
            }
            ApiErrorKind::GatewayTimeout => {
                "Gateway timeout. Temporary internal networking problem."
            }
            ApiErrorKind::Unknown => {
                "Unknown error. Please get in touch with your support representative."
            }
        }
    }
}

/// A request that completed with a non-success status, or produced no response at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// Raw HTTP status, `0` when no response was available.
    pub status: u16,
}

impl ApiError {
    pub fn from_status(status: Option<u16>) -> Self {
        Self {
            kind: ApiErrorKind::from_status(status),
            status: status.unwrap_or(0),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} HTTP Status: {}", self.kind.description(), self.status)
    }
}

impl std::error::Error for ApiError {}
