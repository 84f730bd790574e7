//! Error types for building requests.

/// Errors raised while turning an endpoint descriptor into a request.
///
/// No request is sent when one of these occurs. The action reports it on
/// the failure channel with the transport sentinel code, since no response
/// exists.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// A required identifier or URL was empty.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// An identifier would change the route it is spliced into.
    #[error("parameter {0} is not a valid path segment")]
    InvalidPathSegment(&'static str),

    /// The request body could not be serialized.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}
