/// Errors that can occur in the transport layer.
///
/// Any of these means "no usable response": the request action reports
/// them with the transport sentinel code, not an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built (bad URL, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Sending the request failed: DNS, connect, TLS, timeout.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// A response arrived but its body could not be read.
    #[error("reading response body failed: {0}")]
    BodyFailed(String),
}
