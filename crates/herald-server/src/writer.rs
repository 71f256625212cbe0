use axum::body::Body;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// Minimal response sink used by the responder
///
/// Calls are expected in order: headers, then one status, then one body.
pub trait ResponseWriter {
    /// Set a header, replacing any previous value
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Write the status line
    fn write_status(&mut self, status: StatusCode);

    /// Write the complete body
    fn write_body(&mut self, body: Bytes);
}

/// In-memory [`ResponseWriter`] that becomes an axum [`Response`]
///
/// Once the status is written, headers are frozen; a second status or body
/// write is dropped. Writing a body without a status implies `200 OK`.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}

impl ResponseWriter for BufferedResponse {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.status.is_some() {
            tracing::debug!(header = %name, "header set after status was written, ignoring");
            return;
        }
        self.headers.insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        if let Some(written) = self.status {
            tracing::debug!(%written, attempted = %status, "superfluous status write, ignoring");
            return;
        }
        self.status = Some(status);
    }

    fn write_body(&mut self, body: Bytes) {
        if self.body.is_some() {
            tracing::debug!("superfluous body write, ignoring");
            return;
        }
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body = Some(body);
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body.unwrap_or_default()));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}
