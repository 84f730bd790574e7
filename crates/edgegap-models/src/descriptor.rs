//! The uniform error descriptor returned by every failed remote call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Code used when the transport produced no response at all
/// (DNS failure, refused connection, TLS error, ...).
pub const TRANSPORT_ERROR_CODE: i32 = 0;

/// Code used when a success response carried a body we could not decode.
pub const PARSE_ERROR_CODE: i32 = -1;

/// Message paired with [`PARSE_ERROR_CODE`].
pub const PARSE_ERROR_MESSAGE: &str = "Failed to parse response";

/// A `{code, message}` pair describing one failed remote call.
///
/// The fields are private and there are no setters: once built, a
/// descriptor never changes. It only ever exists as the failure half of an
/// outcome.
///
/// `Display` renders the canonical single-line form:
///
/// ```rust
/// use edgegap_models::ErrorDescriptor;
///
/// let err = ErrorDescriptor::new(404, "ticket not found");
/// assert_eq!(
///     err.to_string(),
///     "Error Code: 404, Error Message: ticket not found"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    code: i32,
    message: String,
}

impl ErrorDescriptor {
    /// Builds a descriptor from a code and a message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A transport-level failure: no response was received.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_ERROR_CODE, message)
    }

    /// A success response whose body did not match the expected shape.
    pub fn parse_failure() -> Self {
        Self::new(PARSE_ERROR_CODE, PARSE_ERROR_MESSAGE)
    }

    /// The numeric code (an HTTP status, or one of the sentinels).
    pub fn code(&self) -> i32 {
        self.code
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if this descriptor came from a transport failure.
    pub fn is_transport_error(&self) -> bool {
        self.code == TRANSPORT_ERROR_CODE
    }

    /// Returns `true` if this descriptor came from a decode failure.
    pub fn is_parse_error(&self) -> bool {
        self.code == PARSE_ERROR_CODE
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error Code: {}, Error Message: {}",
            self.code, self.message
        )
    }
}

impl std::error::Error for ErrorDescriptor {}
