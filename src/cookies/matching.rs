//! Domain and path matching rules for cookies.
//!
//! Domain matching is a plain suffix match on dot boundaries. There is no
//! Public Suffix List check: a cookie scoped to `example.com` matches
//! `fra.de.example.com`, and a cookie scoped to `com` would match every
//! `.com` host. Callers that need supercookie protection must filter
//! domains before handing cookies to the jar.

use std::net::IpAddr;

/// Check if a cookie domain matches a request host.
///
/// Both sides are compared case-insensitively and leading dots on the
/// cookie domain are ignored. An empty cookie domain matches any host.
pub fn domain_matches(cookie_domain: &str, host: &str) -> bool {
    let cookie_domain = fold_domain(cookie_domain);
    let host = host.to_ascii_lowercase();

    if cookie_domain.is_empty() || host == cookie_domain {
        return true;
    }

    // IP addresses only ever match exactly
    if is_ip_literal(&host) {
        return false;
    }

    host.len() > cookie_domain.len()
        && host.ends_with(cookie_domain.as_str())
        && host.as_bytes()[host.len() - cookie_domain.len() - 1] == b'.'
}

/// Check if a cookie path matches a request path.
/// Implements RFC 6265 path matching; an empty request path counts as `/`.
pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    let request_path = if request_path.is_empty() {
        "/"
    } else {
        request_path
    };

    if cookie_path == "/" || cookie_path == request_path {
        return true;
    }

    if !request_path.starts_with(cookie_path) {
        return false;
    }

    if cookie_path.ends_with('/') {
        return true;
    }

    request_path.as_bytes().get(cookie_path.len()) == Some(&b'/')
}

/// Derive a cookie path from the request path (RFC 6265 section 5.1.4).
///
/// Everything from the last `/` onward is dropped. If nothing is left, or
/// the request path is not absolute, the result is `/`.
pub fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }

    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}

/// Lower-case a domain and strip any leading dots.
pub(crate) fn fold_domain(domain: &str) -> String {
    domain.trim_start_matches('.').to_ascii_lowercase()
}

/// Returns true for IPv4 and IPv6 literals, bracketed or not.
pub fn is_ip_literal(host: &str) -> bool {
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    host.parse::<IpAddr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_exact_and_case() {
        assert!(domain_matches("www.example.com", "www.example.com"));
        assert!(domain_matches("www.EXAMPLE.com", "www.example.com"));
        assert!(domain_matches("www.example.com", "www.EXAMPLE.com"));
    }

    #[test]
    fn test_domain_suffix() {
        assert!(domain_matches("example.com", "www.example.com"));
        assert!(domain_matches(".example.com", "www.example.com"));
        assert!(domain_matches("EXAMPLE.com", "fra.de.example.com"));
    }

    #[test]
    fn test_domain_mismatch() {
        assert!(!domain_matches("www.example.net", "www.example.com"));
        assert!(!domain_matches("ftp.example.com", "www.example.com"));
        // Suffix without a dot boundary
        assert!(!domain_matches("ample.com", "example.com"));
        // Cookie domain longer than host
        assert!(!domain_matches("www.example.com", "example.com"));
    }

    #[test]
    fn test_domain_empty_matches_everything() {
        assert!(domain_matches("", "example.com"));
        assert!(domain_matches(".", "example.com"));
    }

    #[test]
    fn test_domain_ip_literal() {
        assert!(domain_matches("192.168.0.1", "192.168.0.1"));
        assert!(!domain_matches("168.0.1", "192.168.0.1"));
        assert!(is_ip_literal("[::1]"));
        assert!(is_ip_literal("::1"));
        assert!(!is_ip_literal("example.com"));
    }

    #[test]
    fn test_path_matching() {
        assert!(path_matches("/", "/anything"));
        assert!(path_matches("/foo", "/foo"));
        assert!(path_matches("/foo", "/foo/bar"));
        assert!(path_matches("/foo/", "/foo/bar"));
        assert!(path_matches("/", ""));
        assert!(!path_matches("/foo", "/foobar"));
        assert!(!path_matches("/foo", "/"));
        assert!(!path_matches("/foo/bar", "/foo"));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(default_path(""), "/");
        assert_eq!(default_path("/"), "/");
        assert_eq!(default_path("/foo"), "/");
        assert_eq!(default_path("/foo/bar"), "/foo");
        assert_eq!(default_path("/foo/bar/"), "/foo/bar");
        assert_eq!(default_path("foo/bar"), "/");
    }
}
