//! # cookienet
//!
//! An HTTP cookie jar for Rust clients.
//!
//! `cookienet` keeps the cookies a server sets through `Set-Cookie` headers
//! and adds the right ones back to later requests as a `Cookie` header,
//! following RFC 6265 domain, path, expiry and `Secure` rules.
//!
//! ## Features
//!
//! - **Parsing**: tolerant `Set-Cookie` parsing, including legacy date formats
//! - **Storage**: one cookie per name/domain/path, insertion ordered
//! - **Matching**: case-insensitive domain suffix matching, RFC 6265 paths
//! - **Validation**: lenient by default, strict mode for malformed names
//! - **Snapshots**: lossless export/import, JSON with the `json` feature
//! - **Sessions**: a client session that owns a jar over any transport
//!
//! ## Quick Start
//!
//! ```rust
//! use cookienet::cookies::jar::CookieJar;
//! use url::Url;
//!
//! let mut jar = CookieJar::new();
//! let url = Url::parse("https://example.com/login").unwrap();
//! jar.parse_and_save_cookie(&url, "session_id=abc123; Path=/; Secure")?;
//!
//! let cookies = jar.get_cookies_for_url(&url);
//! assert_eq!(cookies[0].value(), Some("abc123"));
//! # Ok::<(), cookienet::base::neterror::NetError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Cookie parsing, storage and snapshots
//! - [`http`] - Request origins and the cookie session

pub mod base;
pub mod cookies;
pub mod http;
