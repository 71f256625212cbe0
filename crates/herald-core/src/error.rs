use std::error::Error;
use std::fmt;

use crate::classified::ClassifiedError;
use crate::kind::Kind;

/// Boxed error that can cross task and thread boundaries
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Capability of an error to describe itself to an HTTP client
///
/// Anything implementing this trait is rendered with its own status, kind,
/// code and parameter. Errors without it are reported as a generic 500.
pub trait HttpError: Error {
    /// HTTP status code, `0` when never set
    fn status(&self) -> u16;

    /// Semantic category
    fn kind(&self) -> Kind;

    /// Machine-readable condition code, empty when not set
    fn error_code(&self) -> &str;

    /// Offending input field, empty when not applicable
    fn error_param(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// Type-erased classified error
///
/// Wrap a custom [`HttpError`] shape in this type to have it recognized when
/// it travels as a plain boxed error.
pub struct Classified(Box<dyn HttpError + Send + Sync>);

impl Classified {
    pub fn new<E>(error: E) -> Self
    where
        E: HttpError + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }

    pub fn get_ref(&self) -> &(dyn HttpError + Send + Sync) {
        &*self.0
    }

    /// Erase into a [`BoxError`] that [`classify`] still recognizes
    pub fn into_boxed(self) -> BoxError {
        Box::new(self)
    }
}

/// Conversion of any [`HttpError`] shape into a boxed error that stays
/// classified
///
/// Boxing a custom shape directly loses its classification; go through this
/// trait (or [`Classified`]) instead.
pub trait IntoClassified {
    fn into_classified(self) -> BoxError;
}

impl<E> IntoClassified for E
where
    E: HttpError + Send + Sync + 'static,
{
    fn into_classified(self) -> BoxError {
        Classified::new(self).into_boxed()
    }
}

impl fmt::Debug for Classified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classified")
            .field("status", &self.0.status())
            .field("kind", &self.0.kind())
            .field("code", &self.0.error_code())
            .field("param", &self.0.error_param())
            .field("message", &self.0.to_string())
            .finish()
    }
}

impl fmt::Display for Classified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl Error for Classified {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl HttpError for Classified {
    fn status(&self) -> u16 {
        self.0.status()
    }

    fn kind(&self) -> Kind {
        self.0.kind()
    }

    fn error_code(&self) -> &str {
        self.0.error_code()
    }

    fn error_param(&self) -> &str {
        self.0.error_param()
    }

    fn client_message(&self) -> String {
        self.0.client_message()
    }
}

/// Extract the [`HttpError`] capability from an arbitrary error, if it has one
///
/// Only the outermost error is inspected: wrapping a classified error in
/// another error type hides its classification.
pub fn classify<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a dyn HttpError> {
    if let Some(classified) = error.downcast_ref::<ClassifiedError>() {
        return Some(classified as &dyn HttpError);
    }
    error
        .downcast_ref::<Classified>()
        .map(|classified| classified as &dyn HttpError)
}

/// A required input field was not provided
///
/// Deliberately unclassified: on its own it is reported as a generic 500.
/// Wrap it in a [`ClassifiedError`] to surface it to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} is required")]
pub struct MissingField(pub String);

impl MissingField {
    pub fn new(field: impl Into<String>) -> Self {
        Self(field.into())
    }
}

/// Leaf error carrying nothing but a message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Message(String);

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
