//! The one-shot request action.
//!
//! Every API call follows the same life:
//!
//! ```text
//! new(endpoint, transport) ──→ activate(callback) ──→ [request in flight]
//!        (no I/O)                 (returns at once)          │
//!                                                            ▼
//!                                               callback(Ok(model))
//!                                                    or
//!                                               callback(Err(ErrorDescriptor))
//! ```
//!
//! The action is consumed by activation, so it can only ever be activated
//! once, and the callback is an `FnOnce`, so it can only ever fire once.
//! Together they give the "exactly one outcome, exactly once" contract
//! without any runtime flags.

use std::sync::Arc;

use edgegap_models::{ErrorDescriptor, ResponseModel};
use edgegap_transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use tokio::task::JoinHandle;

use crate::Endpoint;

/// The single terminal result of an action: the decoded model, or a
/// descriptor explaining what went wrong.
pub type Outcome<T> = Result<T, ErrorDescriptor>;

/// One API call, ready to fire.
///
/// Holds the endpoint descriptor and a shared handle to the transport.
/// Nothing touches the network until [`activate`](Self::activate) or
/// [`run`](Self::run).
///
/// ## Cancellation
///
/// There is no cancel operation. An owner that goes away before the call
/// completes can `abort()` the [`JoinHandle`] returned by `activate`: the
/// task is dropped along with the callback it captured, and the callback
/// never runs.
pub struct RequestAction<E: Endpoint, T: HttpTransport> {
    endpoint: E,
    transport: Arc<T>,
}

impl<E: Endpoint, T: HttpTransport> RequestAction<E, T> {
    /// Wraps an endpoint descriptor. No I/O happens here.
    pub fn new(endpoint: E, transport: Arc<T>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    /// Sends the request and resolves to its outcome.
    ///
    /// Never returns a Rust error for remote failures: transport errors,
    /// HTTP errors, and undecodable bodies all come back as
    /// `Err(ErrorDescriptor)` inside the outcome.
    pub async fn run(self) -> Outcome<E::Response> {
        let request = match self.endpoint.into_request() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(endpoint = E::NAME, error = %e, "request not sent");
                return Err(ErrorDescriptor::transport(e.to_string()));
            }
        };

        tracing::debug!(
            endpoint = E::NAME,
            method = %request.method,
            url = %request.url,
            "issuing request"
        );

        let result = self.transport.send(request.clone()).await;
        let outcome = resolve::<E::Response>(&request, result);

        match &outcome {
            Ok(_) => tracing::debug!(endpoint = E::NAME, "request succeeded"),
            Err(err) => tracing::warn!(
                endpoint = E::NAME,
                code = err.code(),
                error = err.message(),
                "request failed"
            ),
        }
        outcome
    }

    /// Fires the request on the Tokio runtime and returns immediately.
    ///
    /// `on_complete` runs exactly once, on a runtime worker, with the
    /// outcome.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime (same as `tokio::spawn`).
    pub fn activate<F>(self, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Outcome<E::Response>) + Send + 'static,
    {
        tokio::spawn(async move {
            let outcome = self.run().await;
            on_complete(outcome);
        })
    }

    /// Like [`activate`](Self::activate), with separate success and
    /// failure callbacks. Exactly one of them runs.
    pub fn activate_with<S, F>(self, on_success: S, on_failure: F) -> JoinHandle<()>
    where
        S: FnOnce(E::Response) + Send + 'static,
        F: FnOnce(ErrorDescriptor) + Send + 'static,
    {
        self.activate(move |outcome| match outcome {
            Ok(model) => on_success(model),
            Err(err) => on_failure(err),
        })
    }
}

/// Maps a transport result to an outcome.
///
/// 1. No response → transport sentinel code, transport error text.
/// 2. Non-2xx → the status as code, the body (or a default) as message.
/// 3. 2xx → decode; failure → parse sentinel code and fixed message.
///
/// Every credential the request carried is masked in the message.
pub fn resolve<M: ResponseModel>(
    request: &HttpRequest,
    result: Result<HttpResponse, TransportError>,
) -> Outcome<M> {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            return Err(ErrorDescriptor::transport(request.redact(&e.to_string())));
        }
    };

    if !response.is_success() {
        let body = response.text();
        let message = if body.trim().is_empty() {
            format!("Request failed with HTTP status {}", response.status)
        } else {
            request.redact(&body)
        };
        return Err(ErrorDescriptor::new(i32::from(response.status), message));
    }

    M::from_body(&response.body).map_err(|e| {
        tracing::debug!(error = %e, "response body did not decode");
        ErrorDescriptor::parse_failure()
    })
}
