use std::error::Error;

use axum::response::{IntoResponse, Response};
use herald_core::{BoxError, BuildError, Classified, ClassifiedError, HttpError, Message, MissingField};

use crate::responder::Responder;
use crate::writer::BufferedResponse;

/// Terminal error of an axum handler
///
/// Holds any error and renders it through the [`Responder`] when axum turns
/// it into a response, so handlers can return `Result<T, ApiError>`.
#[derive(Debug)]
pub struct ApiError(BoxError);

impl ApiError {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }

    /// Keep a caller-defined [`HttpError`] shape classified
    ///
    /// Boxing such a value directly hides its classification; this wraps it
    /// in [`Classified`] first.
    pub fn classified<E>(error: E) -> Self
    where
        E: HttpError + Send + Sync + 'static,
    {
        Self(Classified::new(error).into_boxed())
    }

    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }

    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl From<BoxError> for ApiError {
    fn from(error: BoxError) -> Self {
        Self(error)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self(error.into())
    }
}

macro_rules! api_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ApiError {
                fn from(error: $ty) -> Self {
                    Self(Box::new(error))
                }
            }
        )*
    };
}

api_error_from!(ClassifiedError, Classified, BuildError, MissingField, Message, std::io::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut buffered = BufferedResponse::new();
        let error: &(dyn Error + 'static) = &*self.0;
        Responder::new().respond(&mut buffered, Some(error));
        buffered.into_response()
    }
}
