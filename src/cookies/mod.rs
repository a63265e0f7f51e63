//! Cookie storage, parsing and matching.
//!
//! This module provides a complete client-side cookie jar:
//!
//! - **Parsing**: `Set-Cookie` lines into [`SetCookie`](setcookie::SetCookie) records ([`parser`])
//! - **Storage**: an insertion-ordered jar with one slot per name/domain/path ([`CookieJar`](jar::CookieJar))
//! - **Matching**: RFC 6265 domain, path, expiry and `Secure` rules ([`matching`])
//! - **Snapshots**: lossless export/import of the jar ([`snapshot`])
//!
//! # Architecture
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`SetCookie`](setcookie::SetCookie) | One cookie and its attributes, validation |
//! | [`CookieJar`](jar::CookieJar) | Dedup, extraction, `Cookie` header, clearing |
//! | [`ValidationMode`](jar::ValidationMode) | Strict or lenient handling of bad names |
//! | [`CookieAttributes`](snapshot::CookieAttributes) | Snapshot schema |
//!
//! # Extracting and sending cookies
//!
//! ```rust
//! use cookienet::cookies::jar::CookieJar;
//! use http::{Request, Response};
//!
//! let mut jar = CookieJar::new();
//! let request = Request::get("https://example.com/login").body(()).unwrap();
//! let response = Response::builder()
//!     .header("Set-Cookie", "sid=abc123; Path=/; Secure; HttpOnly")
//!     .body(())
//!     .unwrap();
//! jar.extract_cookies(&request, &response)?;
//!
//! let next = Request::get("https://example.com/account").body(()).unwrap();
//! let next = jar.with_cookie_header(next)?;
//! assert_eq!(next.headers()["cookie"], "sid=abc123");
//! # Ok::<(), cookienet::base::neterror::NetError>(())
//! ```
//!
//! # Domain matching
//!
//! Domains are matched by plain suffix with no Public Suffix List check, so
//! a cookie for `example.com` is sent to every subdomain of it.

pub mod error;
pub mod jar;
pub mod matching;
pub mod parser;
pub mod setcookie;
pub mod snapshot;
