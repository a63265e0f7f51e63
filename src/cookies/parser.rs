//! `Set-Cookie` header parsing.
//!
//! Lines are parsed with the `cookie` crate. Parsing is lenient: a malformed
//! attribute is dropped, and only a line with no usable `name=value` pair is
//! rejected. Name validation happens later, in the jar.

use crate::cookies::setcookie::{expiry_from_max_age, SetCookie};
use cookie::Cookie;
use time::OffsetDateTime;

/// Parse one `Set-Cookie` header value, using the current time as the
/// receipt time for `Max-Age`.
pub fn parse_set_cookie(line: &str) -> Option<SetCookie> {
    parse_set_cookie_at(line, OffsetDateTime::now_utc())
}

/// Parse one `Set-Cookie` header value received at `now`.
///
/// Returns `None` if the line has no `=` in its first segment or an empty
/// name. The returned record has no domain unless a non-empty `Domain`
/// attribute was present, and its path is the raw `Path` attribute (empty if
/// absent).
pub fn parse_set_cookie_at(line: &str, now: OffsetDateTime) -> Option<SetCookie> {
    let parsed = match Cookie::parse(line) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::trace!(error = %err, "unparseable Set-Cookie line");
            return None;
        }
    };

    let max_age = parsed.max_age().map(|age| age.whole_seconds());
    // Max-Age takes precedence over Expires
    let expires = match max_age {
        Some(seconds) => Some(expiry_from_max_age(seconds, now)),
        None => parsed.expires_datetime(),
    };

    Some(SetCookie {
        name: Some(parsed.name().to_string()),
        value: Some(parsed.value().to_string()),
        domain: parsed
            .domain()
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        path: parsed.path().unwrap_or_default().to_string(),
        max_age,
        expires,
        discard: has_discard_flag(line).then_some(true),
        secure: parsed.secure().unwrap_or(false),
        http_only: parsed.http_only().unwrap_or(false),
    })
}

// `cookie` drops attributes it does not know, Discard among them.
fn has_discard_flag(line: &str) -> bool {
    line.split(';').skip(1).any(|attr| {
        let key = attr.split_once('=').map_or(attr, |(k, _)| k);
        key.trim().eq_ignore_ascii_case("discard")
    })
}
