//! Cookie validation failures.
//!
//! A [`CookieError`] describes why a record cannot be stored. Whether the
//! failure surfaces as an error or as a silent rejection is decided by the
//! jar's [`ValidationMode`](crate::cookies::jar::ValidationMode).

use thiserror::Error;

/// Why a cookie record failed validation.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum CookieError {
    #[error("The cookie name must not be empty")]
    EmptyName,
    #[error(
        "Cookie name must not contain invalid characters: ASCII Control characters (0-31;127), space, tab and the following characters: ()<>@,;:\\\"/?={{}}"
    )]
    InvalidName,
    #[error("The cookie value must not be empty")]
    EmptyValue,
    #[error("The cookie domain must not be empty")]
    EmptyDomain,
}

/// Returns true if `b` may not appear in a cookie name.
///
/// Covers ASCII control characters (0-31, 127), space, and the RFC 2616
/// separators `()<>@,;:\"/?={}`. Tab is a control character.
pub(crate) fn is_forbidden_name_byte(b: u8) -> bool {
    matches!(
        b,
        0x00..=0x20
            | 0x7f
            | b'"'
            | b'('
            | b')'
            | b','
            | b'/'
            | b':'..=b'@'
            | b'\\'
            | b'{'
            | b'}'
    )
}
