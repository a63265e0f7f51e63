use crate::base::neterror::NetError;
use crate::cookies::error::CookieError;
use crate::cookies::matching::{default_path, fold_domain};
use crate::cookies::parser::parse_set_cookie;
use crate::cookies::setcookie::SetCookie;
use crate::cookies::snapshot::CookieAttributes;
use crate::http::origin::RequestOrigin;
use http::header::{HeaderValue, COOKIE, SET_COOKIE};
use http::{Request, Response};
use indexmap::IndexMap;
use time::OffsetDateTime;
use url::Url;

/// How the jar reacts to records that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Every invalid record is dropped and `set_cookie` returns `false`.
    #[default]
    Lenient,
    /// Records whose name contains forbidden characters are reported as
    /// errors. Other incomplete records are still dropped silently.
    Strict,
}

/// Outcome of checking a record against a [`ValidationMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The record can be stored under this key.
    Accepted(CookieKey),
    /// The record is dropped without an error.
    Rejected(CookieError),
    /// The record must be reported to the caller.
    Invalid(CookieError),
}

impl ValidationMode {
    pub fn check(self, cookie: &SetCookie) -> Validation {
        match cookie.validate() {
            Ok(()) => match CookieKey::of(cookie) {
                Some(key) => Validation::Accepted(key),
                None => Validation::Rejected(CookieError::EmptyName),
            },
            Err(CookieError::InvalidName) if self == ValidationMode::Strict => {
                Validation::Invalid(CookieError::InvalidName)
            }
            Err(err) => Validation::Rejected(err),
        }
    }
}

/// Storage slot of a cookie: name, folded domain and path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookieKey {
    name: String,
    domain: String,
    path: String,
}

impl CookieKey {
    fn of(cookie: &SetCookie) -> Option<Self> {
        Some(Self {
            name: cookie.name.clone()?,
            domain: fold_domain(cookie.domain.as_deref()?),
            path: cookie.path.clone(),
        })
    }
}

/// An in-memory cookie jar for one HTTP client or session.
///
/// Cookies are kept in insertion order; replacing a cookie moves it to the
/// end. The jar does no locking. Share it behind a lock if several tasks
/// need it.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: IndexMap<CookieKey, SetCookie>,
    mode: ValidationMode,
}

impl CookieJar {
    /// An empty lenient jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// A jar that reports malformed cookie names as errors.
    pub fn strict() -> Self {
        Self::with_mode(ValidationMode::Strict)
    }

    /// An empty jar using `mode` for validation.
    pub fn with_mode(mode: ValidationMode) -> Self {
        Self {
            cookies: IndexMap::new(),
            mode,
        }
    }

    /// Rebuild a jar from a snapshot produced by [`CookieJar::to_array`].
    pub fn from_snapshot(
        mode: ValidationMode,
        snapshot: impl IntoIterator<Item = CookieAttributes>,
    ) -> Result<Self, NetError> {
        let mut jar = Self::with_mode(mode);
        for attrs in snapshot {
            jar.set_cookie(SetCookie::from(attrs))?;
        }
        Ok(jar)
    }

    /// Create a jar of session cookies from name/value pairs, all on `domain`
    /// with path `/`.
    pub fn from_pairs<I, K, V>(pairs: I, domain: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut jar = Self::new();
        for (name, value) in pairs {
            let cookie = SetCookie::new(name, value, domain).with_discard(true);
            if let Validation::Accepted(key) = jar.mode.check(&cookie) {
                jar.store(key, cookie);
            }
        }
        jar
    }

    /// The validation mode chosen at construction.
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Store a cookie, replacing any cookie with the same name, domain and
    /// path.
    ///
    /// Returns `Ok(false)` for records that fail validation. In strict mode
    /// a malformed name is an error. A record without a value removes the
    /// cookie it would have replaced.
    pub fn set_cookie(&mut self, cookie: SetCookie) -> Result<bool, NetError> {
        match self.mode.check(&cookie) {
            Validation::Accepted(key) => {
                tracing::trace!(
                    name = %key.name,
                    domain = %key.domain,
                    path = %key.path,
                    "storing cookie"
                );
                self.store(key, cookie);
                Ok(true)
            }
            Validation::Rejected(err) => {
                tracing::debug!(
                    reason = %err,
                    name = cookie.name().unwrap_or_default(),
                    domain = cookie.domain().unwrap_or_default(),
                    "rejecting cookie"
                );
                if err == CookieError::EmptyValue {
                    self.remove_cookie_if_empty(&cookie);
                }
                Ok(false)
            }
            Validation::Invalid(err) => Err(NetError::InvalidCookie(err)),
        }
    }

    // Replacing moves the entry to the end
    fn store(&mut self, key: CookieKey, cookie: SetCookie) {
        self.cookies.shift_remove(&key);
        self.cookies.insert(key, cookie);
    }

    fn remove_cookie_if_empty(&mut self, cookie: &SetCookie) {
        if let Some(key) = CookieKey::of(cookie) {
            self.cookies.shift_remove(&key);
        }
    }

    /// Store the cookies set by `response`, which answered `request`.
    pub fn extract_cookies<B, C>(
        &mut self,
        request: &Request<B>,
        response: &Response<C>,
    ) -> Result<(), NetError> {
        let lines = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok());
        self.extract_cookies_from_origin(&RequestOrigin::from_request(request), lines)
    }

    /// Store cookies from raw `Set-Cookie` values received from `origin`.
    ///
    /// Lines that do not parse, and cookies whose `Domain` does not cover the
    /// request host, are skipped.
    pub fn extract_cookies_from_origin<'a>(
        &mut self,
        origin: &RequestOrigin,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), NetError> {
        for line in lines {
            let Some(mut cookie) = parse_set_cookie(line) else {
                tracing::debug!(line = %line, "skipping malformed Set-Cookie");
                continue;
            };

            if cookie.domain.is_none() {
                cookie.domain = Some(origin.host.clone());
            }
            if !cookie.path.starts_with('/') {
                cookie.path = default_path(&origin.path);
            }
            if !cookie.matches_domain(&origin.host) {
                tracing::debug!(
                    name = cookie.name().unwrap_or_default(),
                    domain = cookie.domain().unwrap_or_default(),
                    host = %origin.host,
                    "ignoring cookie for foreign domain"
                );
                continue;
            }

            self.set_cookie(cookie)?;
        }
        Ok(())
    }

    /// Parse and store one `Set-Cookie` value received from `url`.
    pub fn parse_and_save_cookie(&mut self, url: &Url, cookie_line: &str) -> Result<(), NetError> {
        self.extract_cookies_from_origin(&RequestOrigin::from_url(url), [cookie_line])
    }

    /// Cookies to send to `origin`, in jar order.
    pub fn matching_cookies(&self, origin: &RequestOrigin) -> Vec<&SetCookie> {
        let now = OffsetDateTime::now_utc();
        let secure = origin.is_secure();

        self.cookies
            .values()
            .filter(|c| c.matches_path(&origin.path))
            .filter(|c| c.matches_domain(&origin.host))
            .filter(|c| !c.is_expired_at(now))
            .filter(|c| !c.secure || secure)
            .collect()
    }

    /// Get cookies matching the URL.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<SetCookie> {
        self.matching_cookies(&RequestOrigin::from_url(url))
            .into_iter()
            .cloned()
            .collect()
    }

    /// The `Cookie` header value for `origin`, or `None` if nothing matches.
    pub fn cookie_header_value(&self, origin: &RequestOrigin) -> Option<String> {
        let pairs: Vec<String> = self
            .matching_cookies(origin)
            .into_iter()
            .map(|c| {
                format!(
                    "{}={}",
                    c.name().unwrap_or_default(),
                    c.value().unwrap_or_default()
                )
            })
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Return `request` with a `Cookie` header holding every matching cookie.
    ///
    /// Any `Cookie` header already on the request is replaced. A request that
    /// matches no cookie is returned unchanged.
    pub fn with_cookie_header<B>(&self, mut request: Request<B>) -> Result<Request<B>, NetError> {
        let origin = RequestOrigin::from_request(&request);
        if let Some(value) = self.cookie_header_value(&origin) {
            let value = HeaderValue::from_str(&value).map_err(|_| NetError::InvalidHeader)?;
            request.headers_mut().insert(COOKIE, value);
        }
        Ok(request)
    }

    /// Remove cookies matching every given filter. `None` matches anything.
    ///
    /// `domain` is compared with domain matching, so
    /// `clear(Some("example.com"), None, None)` drops every cookie that would
    /// be sent to `example.com`. Without a name, `path` is compared with path
    /// matching. With a name, the path must be equal, so only that one slot
    /// goes.
    pub fn clear(&mut self, domain: Option<&str>, path: Option<&str>, name: Option<&str>) {
        self.cookies.retain(|_, c| {
            let path_matches = match (path, name) {
                (None, _) => true,
                (Some(p), Some(_)) => c.path() == p,
                (Some(p), None) => c.matches_path(p),
            };
            let matches = path_matches
                && domain.map_or(true, |d| c.matches_domain(d))
                && name.map_or(true, |n| c.name() == Some(n));
            !matches
        });
    }

    /// Remove every cookie that is not persistent: discard cookies and
    /// cookies without an expiration.
    pub fn clear_session_cookies(&mut self) {
        self.cookies.retain(|_, c| c.is_persistent());
    }

    /// First stored cookie named exactly `name`.
    pub fn get_cookie_by_name(&self, name: &str) -> Option<&SetCookie> {
        if name.is_empty() {
            return None;
        }
        self.cookies.values().find(|c| c.name() == Some(name))
    }

    /// Snapshot of every stored cookie, in jar order.
    pub fn to_array(&self) -> Vec<CookieAttributes> {
        self.cookies.values().map(SetCookie::to_attributes).collect()
    }

    /// Number of stored cookies, expired ones included.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetCookie> + '_ {
        self.cookies.values()
    }
}

impl<'a> IntoIterator for &'a CookieJar {
    type Item = &'a SetCookie;
    type IntoIter = indexmap::map::Values<'a, CookieKey, SetCookie>;

    fn into_iter(self) -> Self::IntoIter {
        self.cookies.values()
    }
}
