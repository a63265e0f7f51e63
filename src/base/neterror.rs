use crate::cookies::error::CookieError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Cookie Errors
    #[error("Invalid cookie: {0}")]
    InvalidCookie(#[from] CookieError),
    #[error("Invalid cookie snapshot: {message}")]
    InvalidSnapshot { message: String },

    // HTTP Errors
    #[error("Invalid header")]
    InvalidHeader,

    // Transport Errors
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Empty response")]
    EmptyResponse,
}

impl NetError {
    /// Create a snapshot error from any displayable cause.
    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        NetError::InvalidSnapshot {
            message: message.into(),
        }
    }

    /// The validation failure behind this error, if it is a cookie error.
    pub fn cookie_error(&self) -> Option<CookieError> {
        match self {
            NetError::InvalidCookie(err) => Some(*err),
            _ => None,
        }
    }
}
