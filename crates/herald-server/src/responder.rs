//! Turns a failed request's error into its HTTP response
//!
//! Errors exposing [`HttpError`] are rendered with their own status, kind,
//! code, parameter and message. Everything else becomes a fixed 500 whose
//! body reveals nothing; the real error text only reaches the log.

use std::error::Error;

use bytes::Bytes;
use herald_core::{HttpError, Kind, classify};
use http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderValue, StatusCode};
use tracing::Dispatch;

use crate::envelope::ErrorResponse;
use crate::writer::ResponseWriter;

/// Message sent to clients for any error that was never classified
pub const FALLBACK_MESSAGE: &str = "Unexpected error - contact support";

/// Renders errors into a [`ResponseWriter`]
///
/// Logs through the ambient `tracing` subscriber unless a dispatcher was
/// injected with [`Responder::with_dispatch`].
#[derive(Clone, Default)]
pub struct Responder {
    dispatch: Option<Dispatch>,
}

impl Responder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send every log line of this responder to `dispatch`
    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Write the response for `error`, or nothing when there is no error
    pub fn respond<W>(&self, writer: &mut W, error: Option<&(dyn Error + 'static)>)
    where
        W: ResponseWriter + ?Sized,
    {
        let Some(error) = error else {
            return;
        };

        let (status, envelope) = match classify(error) {
            Some(classified) => self.classified(classified),
            None => self.unclassified(error),
        };
        let body = self.encode(&envelope);

        writer.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        writer.set_header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        writer.write_status(status);
        writer.write_body(body);
    }

    fn classified(&self, error: &dyn HttpError) -> (StatusCode, ErrorResponse) {
        let status = self.resolve_status(error.status());
        let kind = error.kind();
        let code = error.error_code();
        let param = error.error_param();
        let message = error.client_message();

        self.log(|| {
            if status.is_server_error() {
                tracing::error!(status = status.as_u16(), %kind, code, param, "HTTP {} - {message}", status.as_u16());
            } else if status.is_client_error() {
                tracing::warn!(status = status.as_u16(), %kind, code, param, "HTTP {} - {message}", status.as_u16());
            } else {
                tracing::info!(status = status.as_u16(), %kind, code, param, "HTTP {} - {message}", status.as_u16());
            }
        });

        (status, ErrorResponse::new(kind.as_str(), code, param, message))
    }

    fn unclassified(&self, error: &(dyn Error + 'static)) -> (StatusCode, ErrorResponse) {
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        self.log(|| {
            tracing::error!(
                status = status.as_u16(),
                error = %error,
                "Unknown Error - HTTP {} - {error}",
                status.as_u16()
            );
        });

        (
            status,
            ErrorResponse::new(Kind::Unanticipated.as_str(), "", "", FALLBACK_MESSAGE),
        )
    }

    /// Map a classified status to the one actually written
    ///
    /// `0` means the failure site never set a status.
    fn resolve_status(&self, status: u16) -> StatusCode {
        if status == 0 {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        StatusCode::from_u16(status).unwrap_or_else(|_| {
            self.log(|| tracing::warn!(status, "classified error carries an invalid HTTP status, sending 500"));
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }

    fn encode(&self, envelope: &ErrorResponse) -> Bytes {
        match envelope.to_pretty_json() {
            Ok(body) => Bytes::from(body),
            Err(e) => {
                self.log(|| tracing::error!(error = %e, "failed to encode error response body"));
                Bytes::new()
            }
        }
    }

    fn log(&self, emit: impl FnOnce()) {
        match self.dispatch {
            Some(ref dispatch) => tracing::dispatcher::with_default(dispatch, emit),
            None => emit(),
        }
    }
}

/// Write the response for `error` with a default [`Responder`]
pub fn respond<W>(writer: &mut W, error: Option<&(dyn Error + 'static)>)
where
    W: ResponseWriter + ?Sized,
{
    Responder::new().respond(writer, error);
}
