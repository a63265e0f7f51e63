//! Cookie jar snapshots.
//!
//! A snapshot is an ordered list of [`CookieAttributes`], one per stored
//! cookie, using the attribute names of the `Set-Cookie` header as keys:
//!
//! ```json
//! [{"Name": "sid", "Value": "abc", "Domain": "example.com", "Path": "/",
//!   "Max-Age": null, "Expires": 1735689600, "Discard": false,
//!   "Secure": true, "HttpOnly": false}]
//! ```
//!
//! `Expires` is stored as Unix seconds. Where the snapshot is kept is up to
//! the caller.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(feature = "json")]
use crate::base::neterror::NetError;
#[cfg(feature = "json")]
use crate::cookies::jar::{CookieJar, ValidationMode};

/// Serializable representation of one stored cookie.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CookieAttributes {
    #[serde(rename = "Name", default)]
    pub name: Option<Scalar>,
    #[serde(rename = "Value", default)]
    pub value: Option<Scalar>,
    #[serde(rename = "Domain", default)]
    pub domain: Option<String>,
    #[serde(rename = "Path", default)]
    pub path: Option<String>,
    #[serde(rename = "Max-Age", default)]
    pub max_age: Option<i64>,
    #[serde(rename = "Expires", default, with = "time::serde::timestamp::option")]
    pub expires: Option<OffsetDateTime>,
    #[serde(rename = "Discard", default)]
    pub discard: Option<bool>,
    #[serde(rename = "Secure", default)]
    pub secure: bool,
    #[serde(rename = "HttpOnly", default)]
    pub http_only: bool,
}

/// A loosely typed name or value, as found in foreign snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Booleans are not names; the cookie is treated as nameless.
    pub(crate) fn into_name(self) -> Option<String> {
        match self {
            Scalar::Bool(_) => None,
            other => Some(other.into_value()),
        }
    }

    pub(crate) fn into_value(self) -> String {
        match self {
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Bool(false) => String::new(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

#[cfg(feature = "json")]
impl CookieJar {
    /// Serialize the jar's snapshot to JSON.
    pub fn to_json(&self) -> Result<String, NetError> {
        serde_json::to_string_pretty(&self.to_array())
            .map_err(|e| NetError::invalid_snapshot(e.to_string()))
    }

    /// Build a jar from a JSON snapshot.
    pub fn from_json(mode: ValidationMode, json: &str) -> Result<CookieJar, NetError> {
        let snapshot: Vec<CookieAttributes> =
            serde_json::from_str(json).map_err(|e| NetError::invalid_snapshot(e.to_string()))?;
        CookieJar::from_snapshot(mode, snapshot)
    }
}
