//! Error types for the models layer.
//!
//! These are *local* failures (a body we could not decode). They never
//! cross the action boundary as-is: the action turns them into an
//! [`ErrorDescriptor`](crate::ErrorDescriptor) carrying the parse-error
//! sentinel.

/// Errors that can occur while decoding a response body.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The body is not valid JSON.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The body is valid JSON but not an object, so no field can be
    /// looked up by key.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// The body was empty and the model requires content.
    #[error("response body is empty")]
    EmptyBody,
}
