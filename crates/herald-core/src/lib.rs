//! Error taxonomy and classified-error construction for Herald
//!
//! Failure sites describe what went wrong with a [`Kind`], an optional
//! [`Code`] and [`Parameter`], and an HTTP status, using [`build`] or the
//! [`classify!`] macro. The server layer renders anything implementing
//! [`HttpError`] and hides everything else behind a generic 500.

#![allow(clippy::must_use_candidate)]

mod builder;
mod classified;
mod error;
mod kind;

pub use builder::{Arg, BuildError, build};
pub use classified::ClassifiedError;
pub use error::{BoxError, Classified, HttpError, IntoClassified, Message, MissingField, classify};
pub use kind::{Code, Kind, Parameter};
