//! A client session that owns a cookie jar.
//!
//! [`CookieSession`] wraps any [`Transport`]: cookies from the jar are added
//! to each outgoing request, and `Set-Cookie` headers on the response are
//! stored before the response is handed back. Because extraction finishes
//! inside [`CookieSession::send`], the next request on the same session
//! always sees the cookies set by the previous response.

use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::origin::RequestOrigin;
use bytes::Bytes;
use http::header::SET_COOKIE;
use http::{Request, Response};
use std::future::Future;

/// Sends a request and yields the response once its headers are available.
pub trait Transport {
    fn send(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>, NetError>> + Send;
}

pub struct CookieSession<T> {
    transport: T,
    jar: CookieJar,
}

impl<T: Transport> CookieSession<T> {
    pub fn new(transport: T) -> Self {
        Self::with_jar(transport, CookieJar::new())
    }

    pub fn with_jar(transport: T, jar: CookieJar) -> Self {
        Self { transport, jar }
    }

    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    pub fn jar_mut(&mut self) -> &mut CookieJar {
        &mut self.jar
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_parts(self) -> (T, CookieJar) {
        (self.transport, self.jar)
    }

    /// Send `request` with the jar's cookies and store the cookies the
    /// response sets.
    pub async fn send(&mut self, request: Request<Bytes>) -> Result<Response<Bytes>, NetError> {
        let origin = RequestOrigin::from_request(&request);
        let request = self.jar.with_cookie_header(request)?;

        tracing::debug!(
            host = %origin.host,
            path = %origin.path,
            cookies = request.headers().contains_key(http::header::COOKIE),
            "sending request"
        );
        let response = self.transport.send(request).await?;

        let lines = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok());
        self.jar.extract_cookies_from_origin(&origin, lines)?;

        Ok(response)
    }
}
