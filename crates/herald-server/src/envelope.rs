use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// JSON body sent for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Inner error object; `code` and `param` are omitted when empty
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub param: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(
        kind: impl Into<String>,
        code: impl Into<String>,
        param: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                kind: kind.into(),
                code: code.into(),
                param: param.into(),
                message: message.into(),
            },
        }
    }

    /// Encode with four-space indentation and a trailing newline
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(128);
        let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}
