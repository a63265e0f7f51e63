use crate::cookies::error::{is_forbidden_name_byte, CookieError};
use crate::cookies::matching;
use crate::cookies::snapshot::{CookieAttributes, Scalar};
use std::fmt;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// A single cookie as received in a `Set-Cookie` header or loaded from a
/// snapshot.
///
/// Records may be incomplete (no name, value or domain); the jar refuses to
/// store those. See [`SetCookie::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub(crate) name: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) domain: Option<String>,
    pub(crate) path: String,
    pub(crate) max_age: Option<i64>,
    pub(crate) expires: Option<OffsetDateTime>,
    pub(crate) discard: Option<bool>,
    pub(crate) secure: bool,
    pub(crate) http_only: bool,
}

impl Default for SetCookie {
    fn default() -> Self {
        Self {
            name: None,
            value: None,
            domain: None,
            path: "/".to_string(),
            max_age: None,
            expires: None,
            discard: None,
            secure: false,
            http_only: false,
        }
    }
}

impl SetCookie {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            domain: Some(domain.into()),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_expires(mut self, expires: OffsetDateTime) -> Self {
        self.expires = Some(truncate_to_seconds(expires));
        self
    }

    /// Set the expiration from a Unix timestamp. Out-of-range values clear it.
    pub fn with_expires_at_unix(mut self, timestamp: i64) -> Self {
        self.expires = OffsetDateTime::from_unix_timestamp(timestamp).ok();
        self
    }

    /// Set `Max-Age`. If no expiration is known yet, it is derived from the
    /// current time.
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        if self.expires.is_none() {
            self.expires = Some(expiry_from_max_age(seconds, OffsetDateTime::now_utc()));
        }
        self
    }

    pub fn with_discard(mut self, discard: bool) -> Self {
        self.discard = Some(discard);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    pub fn expires(&self) -> Option<OffsetDateTime> {
        self.expires
    }

    /// Whether the cookie ends with the session.
    ///
    /// An explicit `Discard` flag wins; otherwise a cookie without `Expires`
    /// and `Max-Age` is a session cookie.
    pub fn discard(&self) -> bool {
        self.discard
            .unwrap_or(self.expires.is_none() && self.max_age.is_none())
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// True for cookies the jar would keep across a session reset.
    pub fn is_persistent(&self) -> bool {
        !self.discard() && self.expires.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }

    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|expiry| now > expiry)
    }

    /// Check if this cookie may be sent to `host`. A cookie without a domain
    /// matches any host.
    pub fn matches_domain(&self, host: &str) -> bool {
        match &self.domain {
            Some(domain) => matching::domain_matches(domain, host),
            None => true,
        }
    }

    pub fn matches_path(&self, request_path: &str) -> bool {
        matching::path_matches(&self.path, request_path)
    }

    /// Check that the record is complete and well formed.
    pub fn validate(&self) -> Result<(), CookieError> {
        let name = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(CookieError::EmptyName),
        };

        if name.bytes().any(is_forbidden_name_byte) {
            return Err(CookieError::InvalidName);
        }

        // Empty strings are technically against RFC 6265 but seen in the wild.
        if self.value.is_none() {
            return Err(CookieError::EmptyValue);
        }

        match self.domain.as_deref() {
            Some(domain) if !domain.is_empty() => Ok(()),
            _ => Err(CookieError::EmptyDomain),
        }
    }

    /// Export the record in the snapshot schema.
    pub fn to_attributes(&self) -> CookieAttributes {
        CookieAttributes {
            name: self.name.clone().map(Scalar::Str),
            value: self.value.clone().map(Scalar::Str),
            domain: self.domain.clone(),
            path: Some(self.path.clone()),
            max_age: self.max_age,
            expires: self.expires,
            discard: Some(self.discard()),
            secure: self.secure,
            http_only: self.http_only,
        }
    }
}

impl From<CookieAttributes> for SetCookie {
    fn from(attrs: CookieAttributes) -> Self {
        let path = attrs
            .path
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "/".to_string());

        let mut cookie = SetCookie {
            name: attrs.name.and_then(Scalar::into_name),
            value: attrs.value.map(Scalar::into_value),
            domain: attrs.domain,
            path,
            max_age: attrs.max_age,
            expires: attrs.expires.map(truncate_to_seconds),
            discard: attrs.discard,
            secure: attrs.secure,
            http_only: attrs.http_only,
        };

        if let (None, Some(max_age)) = (cookie.expires, cookie.max_age) {
            cookie.expires = Some(expiry_from_max_age(max_age, OffsetDateTime::now_utc()));
        }

        cookie
    }
}

/// Renders the record as a `Set-Cookie` header value.
impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}",
            self.name.as_deref().unwrap_or_default(),
            self.value.as_deref().unwrap_or_default()
        )?;

        if let Some(domain) = &self.domain {
            write!(f, "; Domain={}", domain)?;
        }
        write!(f, "; Path={}", self.path)?;
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age)?;
        }
        if let Some(expires) = self.expires {
            let date = expires
                .to_offset(UtcOffset::UTC)
                .format(format_description!(
                    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
                ))
                .map_err(|_| fmt::Error)?;
            write!(f, "; Expires={}", date)?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.discard() {
            f.write_str("; Discard")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        Ok(())
    }
}

/// Expiry for a `Max-Age` received at `now`. Zero or negative ages expire
/// the cookie at the earliest representable time.
pub(crate) fn expiry_from_max_age(max_age: i64, now: OffsetDateTime) -> OffsetDateTime {
    if max_age <= 0 {
        return OffsetDateTime::UNIX_EPOCH;
    }
    now.unix_timestamp()
        .checked_add(max_age)
        .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
        .unwrap_or(time::PrimitiveDateTime::MAX.assume_utc())
}

fn truncate_to_seconds(t: OffsetDateTime) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(t.unix_timestamp()).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let cookie = SetCookie::new("foo", "bar", "example.com");
        assert_eq!(cookie.name(), Some("foo"));
        assert_eq!(cookie.path(), "/");
        assert!(cookie.discard());
        assert!(!cookie.secure());
        assert!(!cookie.is_persistent());
        assert!(cookie.validate().is_ok());
    }

    #[test]
    fn test_max_age_derives_expiry() {
        let before = OffsetDateTime::now_utc().unix_timestamp();
        let cookie = SetCookie::new("foo", "bar", "example.com").with_max_age(1500);
        let expires = cookie.expires().unwrap().unix_timestamp();
        assert!(expires >= before + 1500);
        assert!(!cookie.discard());
        assert!(cookie.is_persistent());
    }

    #[test]
    fn test_explicit_expiry_is_kept_with_max_age() {
        let cookie = SetCookie::new("foo", "bar", "example.com")
            .with_expires_at_unix(1_700_000_000)
            .with_max_age(86400);
        assert_eq!(cookie.expires().unwrap().unix_timestamp(), 1_700_000_000);
        assert_eq!(cookie.max_age(), Some(86400));
    }

    #[test]
    fn test_non_positive_max_age_expires_immediately() {
        let cookie = SetCookie::new("foo", "bar", "example.com").with_max_age(0);
        assert!(cookie.is_expired());
    }

    #[test]
    fn test_explicit_discard_wins() {
        let cookie = SetCookie::new("foo", "bar", "example.com")
            .with_expires_at_unix(4_000_000_000)
            .with_discard(true);
        assert!(cookie.discard());
        assert!(!cookie.is_persistent());
    }

    #[test]
    fn test_validation_failures() {
        assert_eq!(SetCookie::default().validate(), Err(CookieError::EmptyName));
        assert_eq!(
            SetCookie::new("", "0", "foo.com").validate(),
            Err(CookieError::EmptyName)
        );
        assert_eq!(
            SetCookie::new("abc\n", "foo", "bar").validate(),
            Err(CookieError::InvalidName)
        );
        assert_eq!(
            SetCookie::new("a b", "foo", "bar").validate(),
            Err(CookieError::InvalidName)
        );

        let mut no_value = SetCookie::new("foo", "", "foo.com");
        no_value.value = None;
        assert_eq!(no_value.validate(), Err(CookieError::EmptyValue));

        assert_eq!(
            SetCookie::new("foo", "bar", "").validate(),
            Err(CookieError::EmptyDomain)
        );
    }

    #[test]
    fn test_validation_accepts_zeroes() {
        assert!(SetCookie::new("0", "0", "foo.com").validate().is_ok());
        assert!(SetCookie::new("foo", "", "0").validate().is_ok());
    }

    #[test]
    fn test_is_expired_at() {
        let cookie = SetCookie::new("foo", "bar", "example.com").with_expires_at_unix(100);
        let at = |ts| OffsetDateTime::from_unix_timestamp(ts).unwrap();
        assert!(!cookie.is_expired_at(at(100)));
        assert!(cookie.is_expired_at(at(101)));
    }

    #[test]
    fn test_matches() {
        let cookie = SetCookie::new("foo", "bar", ".Example.com").with_path("/acme");
        assert!(cookie.matches_domain("www.example.com"));
        assert!(!cookie.matches_domain("example.org"));
        assert!(cookie.matches_path("/acme/test"));
        assert!(!cookie.matches_path("/acmes"));
    }

    #[test]
    fn test_display() {
        let cookie = SetCookie::new("foo", "bar", "example.com")
            .with_path("/app")
            .with_expires_at_unix(784111777)
            .with_secure(true)
            .with_http_only(true);
        assert_eq!(
            cookie.to_string(),
            "foo=bar; Domain=example.com; Path=/app; Expires=Sun, 06 Nov 1994 08:49:37 GMT; Secure; HttpOnly"
        );
    }

    #[test]
    fn test_display_session_cookie() {
        let cookie = SetCookie::new("sid", "1", "example.com");
        assert_eq!(
            cookie.to_string(),
            "sid=1; Domain=example.com; Path=/; Discard"
        );
    }

    #[test]
    fn test_attributes_roundtrip() {
        let cookie = SetCookie::new("foo", "bar", "Example.com")
            .with_path("/boo")
            .with_expires_at_unix(1_900_000_000)
            .with_max_age(100)
            .with_secure(true);
        let restored = SetCookie::from(cookie.to_attributes());
        assert_eq!(restored.to_attributes(), cookie.to_attributes());
    }
}
