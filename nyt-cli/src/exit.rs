//! Process exit codes per error kind.

use nyt_core::{ApiErrorKind, ConfigFileError, Error, MissingApiKey};

pub const SUCCESS: i32 = 0;
pub const GENERAL: i32 = 1;
pub const INVALID_PARAMETER: i32 = 2;
pub const CONFIGURATION: i32 = 3;
pub const UNAUTHORIZED: i32 = 4;
pub const API: i32 = 5;
pub const TRANSPORT: i32 = 6;
pub const DECODE: i32 = 7;

pub fn code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<MissingApiKey>().is_some()
        || err.downcast_ref::<ConfigFileError>().is_some()
    {
        return CONFIGURATION;
    }

    match err.downcast_ref::<Error>() {
        Some(Error::InvalidParameter { .. }) => INVALID_PARAMETER,
        Some(Error::InvalidRequest(_)) => CONFIGURATION,
        Some(Error::Api(api)) => match api.kind {
            ApiErrorKind::Unauthorized | ApiErrorKind::Forbidden => UNAUTHORIZED,
            _ => API,
        },
        Some(Error::Transport(_) | Error::Cancelled | Error::DeadlineExceeded) => TRANSPORT,
        Some(Error::MissingBody | Error::MalformedResponse(_)) => DECODE,
        None => GENERAL,
    }
}
