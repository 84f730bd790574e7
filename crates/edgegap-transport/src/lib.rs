//! HTTP transport abstraction for the Edgegap toolkit.
//!
//! Provides the [`HttpTransport`] trait that request actions send through,
//! plus the plain-data [`HttpRequest`] / [`HttpResponse`] types that cross
//! it. Keeping the seam this narrow lets tests swap in a canned transport
//! without touching the network.
//!
//! # Feature Flags
//!
//! - `reqwest` (default): [`ReqwestTransport`], backed by `reqwest`

mod error;
#[cfg(feature = "reqwest")]
mod reqwest_transport;

pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

use std::fmt;
use std::future::Future;

use edgegap_models::Secret;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Value of the `Authorization` header.
///
/// The matchmaker takes the bare token; the deployment API wants
/// `token <key>`. The scheme is kept apart from the credential so the
/// credential alone can be redacted from error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    scheme: Option<&'static str>,
    credential: Secret,
}

impl Authorization {
    /// `Authorization: <credential>`
    pub fn bare(credential: impl Into<Secret>) -> Self {
        Self {
            scheme: None,
            credential: credential.into(),
        }
    }

    /// `Authorization: <scheme> <credential>`
    pub fn with_scheme(
        scheme: &'static str,
        credential: impl Into<Secret>,
    ) -> Self {
        Self {
            scheme: Some(scheme),
            credential: credential.into(),
        }
    }

    pub fn credential(&self) -> &Secret {
        &self.credential
    }

    /// The clear-text header value. Only transports should call this.
    pub fn header_value(&self) -> String {
        match self.scheme {
            Some(scheme) => format!("{scheme} {}", self.credential.expose()),
            None => self.credential.expose().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// HttpRequest
// ---------------------------------------------------------------------------

/// A fully described outbound request.
///
/// Built by an endpoint descriptor, consumed by a transport. `Debug` is
/// safe to log: the authorization credential and any registered secrets
/// print as `***`, and the body is omitted.
#[derive(Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub authorization: Option<Authorization>,
    pub body: Option<Value>,
    secrets: Vec<Secret>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            authorization: None,
            body: None,
            secrets: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Adds a non-sensitive header.
    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn authorization(mut self, auth: Authorization) -> Self {
        self.authorization = Some(auth);
        self
    }

    /// Sets a JSON body. The transport adds `Content-Type`.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Registers a secret embedded elsewhere in the request (e.g. a
    /// registry token inside the body) so it gets redacted too.
    pub fn sensitive(mut self, secret: Secret) -> Self {
        if !secret.is_empty() {
            self.secrets.push(secret);
        }
        self
    }

    /// Masks every credential this request carries inside `text`.
    pub fn redact(&self, text: &str) -> String {
        let mut out = match &self.authorization {
            Some(auth) => auth.credential().redact(text),
            None => text.to_string(),
        };
        for secret in &self.secrets {
            out = secret.redact(&out);
        }
        out
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("authorization", &self.authorization)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// HttpResponse
// ---------------------------------------------------------------------------

/// A response as the transport saw it: any status, raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Sends one request and yields one response.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → one transport is shared (behind `Arc`) by
///   every action in flight, each on its own task.
/// - The returned future is `Send` so actions can be spawned onto a
///   multi-threaded runtime.
///
/// Implementations report *every* received response as `Ok`, whatever the
/// status. `Err` is reserved for "no response at all".
pub trait HttpTransport: Send + Sync + 'static {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}
