//! The parts of a request the cookie jar looks at.

use http::header::HOST;
use http::Request;
use url::Url;

/// Scheme, host and path of a request target.
///
/// Ports are not part of cookie matching and are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
        }
    }

    /// Build from an `http::Request`. Relative request targets take their host
    /// from the `Host` header and default to the `http` scheme.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let uri = request.uri();
        let host = match uri.host() {
            Some(host) => host.to_string(),
            None => request
                .headers()
                .get(HOST)
                .and_then(|v| v.to_str().ok())
                .map(strip_port)
                .unwrap_or_default()
                .to_string(),
        };

        Self {
            scheme: uri.scheme_str().unwrap_or("http").to_string(),
            host,
            path: uri.path().to_string(),
        }
    }

    pub fn from_url(url: &Url) -> Self {
        Self {
            scheme: url.scheme().to_string(),
            host: url.host_str().unwrap_or_default().to_string(),
            path: url.path().to_string(),
        }
    }

    /// Whether `Secure` cookies may be sent over this scheme.
    pub fn is_secure(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("https") || self.scheme.eq_ignore_ascii_case("wss")
    }
}

fn strip_port(authority: &str) -> &str {
    // Bracketed IPv6 literal, optionally followed by a port
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_absolute_request() {
        let request = Request::get("https://example.com:8912/foo/bar?x=1")
            .body(())
            .unwrap();
        let origin = RequestOrigin::from_request(&request);
        assert_eq!(origin, RequestOrigin::new("https", "example.com", "/foo/bar"));
        assert!(origin.is_secure());
    }

    #[test]
    fn test_from_relative_request_uses_host_header() {
        let request = Request::get("/login")
            .header(HOST, "Example.com:8080")
            .body(())
            .unwrap();
        let origin = RequestOrigin::from_request(&request);
        assert_eq!(origin, RequestOrigin::new("http", "Example.com", "/login"));
        assert!(!origin.is_secure());
    }

    #[test]
    fn test_from_url() {
        let url = Url::parse("wss://chat.example.com/socket").unwrap();
        let origin = RequestOrigin::from_url(&url);
        assert_eq!(origin.host, "chat.example.com");
        assert_eq!(origin.path, "/socket");
        assert!(origin.is_secure());
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.com:443"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
    }
}
