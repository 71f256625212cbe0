use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::error::HttpError;
use crate::kind::{Code, Kind, Parameter};

/// Error annotated with everything needed to answer an HTTP request
///
/// Created once at the failure site, usually through [`crate::build`] or the
/// [`crate::classify!`] macro, then propagated unchanged until a responder
/// renders it. Its message is the message of the underlying cause.
#[derive(Clone)]
pub struct ClassifiedError {
    status: u16,
    kind: Kind,
    code: Code,
    param: Parameter,
    cause: Arc<dyn Error + Send + Sync>,
}

impl ClassifiedError {
    /// Classify `cause` with no status, kind, code or parameter set
    pub fn new<E>(cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::from_shared(Arc::new(cause))
    }

    pub(crate) fn from_shared(cause: Arc<dyn Error + Send + Sync>) -> Self {
        Self {
            status: 0,
            kind: Kind::default(),
            code: Code::default(),
            param: Parameter::default(),
            cause,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<Code>) -> Self {
        self.code = code.into();
        self
    }

    #[must_use]
    pub fn with_param(mut self, param: impl Into<Parameter>) -> Self {
        self.param = param.into();
        self
    }

    /// Replace the underlying cause, keeping the classification
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Arc::new(cause);
        self
    }

    /// HTTP status code, `0` when never set
    pub const fn status(&self) -> u16 {
        self.status
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    pub const fn code(&self) -> &Code {
        &self.code
    }

    pub const fn param(&self) -> &Parameter {
        &self.param
    }

    /// The underlying cause
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.cause
    }
}

impl fmt::Debug for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifiedError")
            .field("status", &self.status)
            .field("kind", &self.kind)
            .field("code", &self.code)
            .field("param", &self.param)
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.cause, f)
    }
}

impl Error for ClassifiedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.cause)
    }
}

impl HttpError for ClassifiedError {
    fn status(&self) -> u16 {
        self.status
    }

    fn kind(&self) -> Kind {
        self.kind
    }

    fn error_code(&self) -> &str {
        self.code.as_str()
    }

    fn error_param(&self) -> &str {
        self.param.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Message, MissingField};

    #[test]
    fn new_error_is_unset() {
        let error = ClassifiedError::new(Message::new("boom"));
        assert_eq!(error.status(), 0);
        assert_eq!(error.kind(), Kind::Unanticipated);
        assert!(error.code().is_empty());
        assert!(error.param().is_empty());
    }

    #[test]
    fn message_comes_from_cause() {
        let error = ClassifiedError::new(MissingField::new("email"))
            .with_status(400)
            .with_kind(Kind::Validation)
            .with_code("missing_field")
            .with_param("email");
        assert_eq!(error.to_string(), "email is required");
        assert_eq!(error.client_message(), "email is required");
        assert_eq!(error.source().unwrap().to_string(), "email is required");
    }

    #[test]
    fn fluent_setters_overwrite() {
        let error = ClassifiedError::new(Message::new("first"))
            .with_code("a")
            .with_code("b")
            .with_cause(Message::new("second"));
        assert_eq!(error.code().as_str(), "b");
        assert_eq!(error.to_string(), "second");
    }

    #[test]
    fn clones_are_independent() {
        let original = ClassifiedError::new(Message::new("boom")).with_status(404);
        let changed = original.clone().with_status(410).with_kind(Kind::NotFound);
        assert_eq!(original.status(), 404);
        assert_eq!(original.kind(), Kind::Unanticipated);
        assert_eq!(changed.status(), 410);
    }
}
