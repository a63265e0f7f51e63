//! Base types and error handling.
//!
//! Provides the crate-wide error type:
//! - [`NetError`](neterror::NetError): cookie, header and transport failures

pub mod neterror;
