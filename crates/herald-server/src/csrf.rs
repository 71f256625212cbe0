use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use herald_core::{Kind, Message, Parameter};
use http::{HeaderName, Method};

use crate::api_error::ApiError;

/// CSRF protection middleware
///
/// Requests with a side effect must carry `header_name`. Only its presence
/// is checked: a plain form submit cannot set custom headers.
pub async fn csrf_middleware(header_name: HeaderName, request: Request, next: Next) -> Response {
    let method = request.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return next.run(request).await;
    }

    if request.headers().contains_key(&header_name) {
        return next.run(request).await;
    }

    tracing::debug!(%method, path = %request.uri().path(), "request rejected by CSRF protection");

    ApiError::from(herald_core::http_error!(
        403,
        Kind::Permission,
        "csrf_header_missing",
        Parameter::new(header_name.as_str()),
        Message::new(format!("missing CSRF header: {}", header_name.as_str()))
    ))
    .into_response()
}
