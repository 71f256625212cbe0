//! Terse construction of [`ClassifiedError`] values
//!
//! A failure site lists whatever it knows about the failure, in any order:
//!
//! ```
//! use herald_core::{Kind, Message, Parameter, classify};
//!
//! let error = classify!(
//!     400,
//!     Kind::Validation,
//!     "bad_email",
//!     Parameter::new("email"),
//!     Message::new("email is malformed")
//! )
//! .unwrap();
//! assert_eq!(error.status(), 400);
//! assert_eq!(error.param().as_str(), "email");
//! ```
//!
//! Every argument is converted into an [`Arg`]; each field keeps the last
//! value supplied for it.

use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::classified::ClassifiedError;
use crate::error::{BoxError, Classified, Message, MissingField};
use crate::kind::{Code, Kind, Parameter};

/// One argument to [`build`]
#[derive(Debug)]
pub enum Arg {
    /// HTTP status code
    Status(u16),
    /// Semantic category
    Kind(Kind),
    /// Machine-readable condition code
    Code(Code),
    /// Offending input field
    Param(Parameter),
    /// An existing classified error, embedded as the cause
    Wrapped(ClassifiedError),
    /// Any other error, stored as the cause
    Cause(Arc<dyn Error + Send + Sync>),
    /// A value with no meaning to the builder
    Unsupported {
        type_name: &'static str,
        value: String,
    },
}

impl Arg {
    /// Use any error as the underlying cause
    pub fn cause<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Cause(Arc::new(error))
    }

    /// Pass an arbitrary value; [`build`] rejects it with a [`BuildError`]
    pub fn other<T: fmt::Debug>(value: &T) -> Self {
        Self::Unsupported {
            type_name: std::any::type_name::<T>(),
            value: format!("{value:?}"),
        }
    }
}

macro_rules! status_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    u16::try_from(value).map_or_else(|_| Self::other(&value), Self::Status)
                }
            }
        )*
    };
}

status_args!(i16, i32, i64, isize, u8, u32, u64, usize);

impl From<u16> for Arg {
    fn from(value: u16) -> Self {
        Self::Status(value)
    }
}

macro_rules! unsupported_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::other(&value)
                }
            }
        )*
    };
}

unsupported_args!(f32, f64, bool, char, ());

impl From<Kind> for Arg {
    fn from(kind: Kind) -> Self {
        Self::Kind(kind)
    }
}

impl From<Code> for Arg {
    fn from(code: Code) -> Self {
        Self::Code(code)
    }
}

impl From<&str> for Arg {
    fn from(code: &str) -> Self {
        Self::Code(Code::from(code))
    }
}

impl From<String> for Arg {
    fn from(code: String) -> Self {
        Self::Code(Code::from(code))
    }
}

impl From<Parameter> for Arg {
    fn from(param: Parameter) -> Self {
        Self::Param(param)
    }
}

impl From<ClassifiedError> for Arg {
    fn from(error: ClassifiedError) -> Self {
        Self::Wrapped(error)
    }
}

impl From<&ClassifiedError> for Arg {
    fn from(error: &ClassifiedError) -> Self {
        Self::Wrapped(error.clone())
    }
}

impl From<MissingField> for Arg {
    fn from(error: MissingField) -> Self {
        Self::cause(error)
    }
}

impl From<Message> for Arg {
    fn from(error: Message) -> Self {
        Self::cause(error)
    }
}

impl From<Classified> for Arg {
    fn from(error: Classified) -> Self {
        Self::cause(error)
    }
}

impl From<BuildError> for Arg {
    fn from(error: BuildError) -> Self {
        Self::cause(error)
    }
}

impl From<std::io::Error> for Arg {
    fn from(error: std::io::Error) -> Self {
        Self::cause(error)
    }
}

impl From<BoxError> for Arg {
    fn from(error: BoxError) -> Self {
        match error.downcast::<ClassifiedError>() {
            Ok(classified) => Self::Wrapped(*classified),
            Err(other) => Self::Cause(Arc::from(other)),
        }
    }
}

impl From<anyhow::Error> for Arg {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<ClassifiedError>() {
            Ok(classified) => Self::Wrapped(classified),
            Err(other) => Self::from(BoxError::from(other)),
        }
    }
}

/// A [`build`] call that cannot produce a well-formed [`ClassifiedError`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// An argument of a type the builder does not understand
    #[error("unknown type {type_name}, value {value} in error call from {file}:{line}")]
    UnsupportedArgument {
        type_name: &'static str,
        value: String,
        file: &'static str,
        line: u32,
    },
    /// No underlying cause among the arguments
    #[error("error call from {file}:{line} has no underlying cause")]
    MissingCause { file: &'static str, line: u32 },
}

/// Assemble a [`ClassifiedError`] from loosely typed arguments
///
/// Later arguments override earlier ones for the same field. A classified
/// error argument is copied and becomes the cause; any other error becomes
/// the cause verbatim.
///
/// # Errors
///
/// Returns [`BuildError`] when an argument has no meaning to the builder or
/// no cause was supplied. Both are logged with the caller's location.
///
/// Calling it with no arguments at all aborts the process: such a call site
/// is broken regardless of input.
#[track_caller]
pub fn build<I>(args: I) -> Result<ClassifiedError, BuildError>
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let caller = Location::caller();
    let args: Vec<Arg> = args.into_iter().map(Into::into).collect();

    if args.is_empty() {
        tracing::error!(
            file = caller.file(),
            line = caller.line(),
            "error builder called with no arguments"
        );
        std::process::abort();
    }

    let mut status = 0;
    let mut kind = Kind::default();
    let mut code = Code::default();
    let mut param = Parameter::default();
    let mut cause: Option<Arc<dyn Error + Send + Sync>> = None;

    for arg in args {
        match arg {
            Arg::Status(value) => status = value,
            Arg::Kind(value) => kind = value,
            Arg::Code(value) => code = value,
            Arg::Param(value) => param = value,
            Arg::Wrapped(value) => cause = Some(Arc::new(value)),
            Arg::Cause(value) => cause = Some(value),
            Arg::Unsupported { type_name, value } => {
                let error = BuildError::UnsupportedArgument {
                    type_name,
                    value,
                    file: caller.file(),
                    line: caller.line(),
                };
                tracing::error!(
                    file = caller.file(),
                    line = caller.line(),
                    error = %error,
                    "bad call to error builder"
                );
                return Err(error);
            }
        }
    }

    let Some(cause) = cause else {
        let error = BuildError::MissingCause {
            file: caller.file(),
            line: caller.line(),
        };
        tracing::error!(
            file = caller.file(),
            line = caller.line(),
            "bad call to error builder: no underlying cause"
        );
        return Err(error);
    };

    Ok(ClassifiedError::from_shared(cause)
        .with_status(status)
        .with_kind(kind)
        .with_code(code)
        .with_param(param))
}

/// Build a [`ClassifiedError`] from a comma-separated argument list
///
/// Expands to [`build`] with every argument passed through [`Arg::from`].
/// The empty form is rejected at compile time.
#[macro_export]
macro_rules! classify {
    () => {
        ::core::compile_error!("classify! needs at least one argument")
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::build([$($crate::Arg::from($arg)),+])
    };
}

/// Like [`classify!`], but erases the result into a boxed error
///
/// Yields the classified error on success and the [`BuildError`] otherwise,
/// so a failure site can return it directly.
#[macro_export]
macro_rules! http_error {
    ($($arg:expr),+ $(,)?) => {
        $crate::classify!($($arg),+).map_or_else(
            |error| -> $crate::BoxError { ::std::boxed::Box::new(error) },
            |error| -> $crate::BoxError { ::std::boxed::Box::new(error) },
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HttpError, classify};

    fn fields(error: &ClassifiedError) -> (u16, Kind, String, String, String) {
        (
            error.status(),
            error.kind(),
            error.code().to_string(),
            error.param().to_string(),
            error.to_string(),
        )
    }

    #[test]
    fn builds_all_fields() {
        let error = crate::classify!(
            404,
            Kind::NotFound,
            "user_missing",
            Parameter::new("id"),
            Message::new("no such user")
        )
        .unwrap();
        assert_eq!(
            fields(&error),
            (
                404,
                Kind::NotFound,
                "user_missing".to_owned(),
                "id".to_owned(),
                "no such user".to_owned()
            )
        );
    }

    fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut result = Vec::new();
        for (i, &first) in items.iter().enumerate() {
            let mut rest = items.to_vec();
            rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, first);
                result.push(tail);
            }
        }
        result
    }

    #[test]
    fn argument_order_does_not_matter() {
        let canonical = build([
            Arg::from(500),
            Arg::from(Kind::Invalid),
            Arg::from(Code::new("bad_email")),
            Arg::from(Parameter::new("email")),
            Arg::from(Message::new("x")),
        ])
        .unwrap();

        let orders = permutations(&[0, 1, 2, 3, 4]);
        assert_eq!(orders.len(), 120);

        for order in orders {
            let args = order.iter().map(|index| match index {
                0 => Arg::from(500),
                1 => Arg::from(Kind::Invalid),
                2 => Arg::from(Code::new("bad_email")),
                3 => Arg::from(Parameter::new("email")),
                _ => Arg::from(Message::new("x")),
            });
            let error = build(args).unwrap();
            assert_eq!(fields(&error), fields(&canonical), "order {order:?}");
        }
    }

    #[test]
    fn last_value_wins() {
        let error = crate::classify!(
            400,
            Kind::Invalid,
            "first",
            Parameter::new("a"),
            Message::new("first cause"),
            409,
            Kind::Exist,
            Code::new("second"),
            Parameter::new("b"),
            Message::new("second cause"),
        )
        .unwrap();
        assert_eq!(
            fields(&error),
            (
                409,
                Kind::Exist,
                "second".to_owned(),
                "b".to_owned(),
                "second cause".to_owned()
            )
        );
    }

    #[test]
    fn plain_string_is_a_code() {
        let error = crate::classify!("email_taken", Message::new("taken")).unwrap();
        assert_eq!(error.code().as_str(), "email_taken");
        assert!(error.param().is_empty());
    }

    #[test]
    fn status_defaults_to_zero() {
        let error = crate::classify!(Kind::Internal, Message::new("boom")).unwrap();
        assert_eq!(error.status(), 0);
    }

    #[test]
    fn wrapped_classified_error_is_copied() {
        let original = crate::classify!(404, Kind::NotFound, "user_missing", Message::new("no such user")).unwrap();
        let wrapper = crate::classify!(&original, 410).unwrap();

        let changed = wrapper.clone().with_code("changed").with_kind(Kind::Other);
        assert_eq!(original.code().as_str(), "user_missing");
        assert_eq!(original.kind(), Kind::NotFound);
        assert_eq!(original.status(), 404);
        assert_eq!(changed.code().as_str(), "changed");

        let inner = wrapper
            .source()
            .and_then(|source| source.downcast_ref::<ClassifiedError>())
            .expect("cause is the copied classified error");
        assert_eq!(fields(inner), fields(&original));
        assert_eq!(wrapper.to_string(), "no such user");
    }

    #[test]
    fn boxed_classified_error_is_unwrapped() {
        let boxed: BoxError = Box::new(crate::classify!(Kind::Database, Message::new("deadlock")).unwrap());
        let error = crate::classify!(503, boxed).unwrap();
        assert!(error.cause().downcast_ref::<ClassifiedError>().is_some());
        assert_eq!(error.to_string(), "deadlock");
    }

    #[test]
    fn generic_errors_become_the_cause() {
        let error = build([Arg::from(502), Arg::cause(std::fmt::Error)]).unwrap();
        assert_eq!(error.to_string(), std::fmt::Error.to_string());

        let error = crate::classify!(Kind::Io, std::io::Error::other("socket closed")).unwrap();
        assert_eq!(error.to_string(), "socket closed");

        let error = crate::classify!(Kind::Internal, anyhow::anyhow!("pool exhausted")).unwrap();
        assert_eq!(error.to_string(), "pool exhausted");
    }

    #[test]
    fn unsupported_argument_is_reported() {
        let result = crate::classify!(404, 1.5_f64, Message::new("x"));
        match result {
            Err(BuildError::UnsupportedArgument { type_name, value, file, .. }) => {
                assert_eq!(type_name, "f64");
                assert_eq!(value, "1.5");
                assert!(file.ends_with("builder.rs"));
            }
            other => panic!("expected unsupported argument, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_status_is_unsupported() {
        let result = crate::classify!(-1, Message::new("x"));
        assert!(matches!(result, Err(BuildError::UnsupportedArgument { type_name: "i32", .. })));
    }

    #[test]
    fn arbitrary_values_are_unsupported() {
        #[derive(Debug)]
        struct Widget;
        let result = build([Arg::other(&Widget), Arg::from(Message::new("x"))]);
        let error = result.unwrap_err();
        assert!(error.to_string().contains("Widget"));
    }

    #[test]
    fn missing_cause_is_reported() {
        let result = crate::classify!(404, Kind::NotFound, "user_missing");
        assert!(matches!(result, Err(BuildError::MissingCause { .. })));
    }

    #[test]
    fn build_error_is_not_classified() {
        let error = crate::classify!(true, Message::new("x")).unwrap_err();
        assert!(classify(&error).is_none());
    }

    #[test]
    fn http_error_macro_erases_both_outcomes() {
        let ok = crate::http_error!(404, Kind::NotFound, Message::new("gone"));
        assert_eq!(classify(&*ok).map(HttpError::status), Some(404));

        let bad = crate::http_error!(404, Kind::NotFound);
        assert!(bad.downcast_ref::<BuildError>().is_some());
    }
}
