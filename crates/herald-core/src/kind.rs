use std::fmt;

use serde::Serialize;

/// Semantic category of a failure
///
/// The set is closed: adding a category is a change to this enum, never a
/// runtime decision. The default value is [`Kind::Unanticipated`], which is
/// also what every error that was never classified reports.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum Kind {
    /// Nobody classified this failure
    #[default]
    Unanticipated,
    /// Classified, but fits no other category
    Other,
    /// Invalid operation for this type of item
    Invalid,
    /// Input validation failed
    Validation,
    /// The request itself is malformed
    InvalidRequest,
    /// Item does not exist
    NotFound,
    /// Item already exists
    Exist,
    /// Permission denied
    Permission,
    /// Caller is not authenticated
    Unauthenticated,
    /// Caller is authenticated but not allowed
    Unauthorized,
    /// External I/O failure such as a network error
    #[strum(serialize = "IO")]
    Io,
    /// Error reported by a database
    Database,
    /// Internal error or inconsistency
    Internal,
    /// Transient failure, retry may succeed
    Transient,
    /// Information withheld
    Private,
    /// Request body has an unsupported media type
    UnsupportedMediaType,
}

impl Kind {
    /// Stable string projection of this kind
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl Serialize for Kind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Machine-readable identifier of a specific error condition (e.g. `email_taken`)
///
/// There is no registry; any string is legal. The empty string means the
/// code was not set and is omitted from responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no code was provided
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Code {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl From<String> for Code {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the input field or argument that caused the failure
///
/// Always wrap field names in this type when building an error: a plain
/// string is read as a [`Code`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Parameter(String);

impl Parameter {
    pub fn new(param: impl Into<String>) -> Self {
        Self(param.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no parameter applies
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Parameter {
    fn from(param: &str) -> Self {
        Self(param.to_owned())
    }
}

impl From<String> for Parameter {
    fn from(param: String) -> Self {
        Self(param)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
