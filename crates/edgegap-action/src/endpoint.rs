//! The per-endpoint strategy injected into [`RequestAction`](crate::RequestAction).

use edgegap_models::{ResponseModel, Secret};
use edgegap_transport::{Authorization, HttpRequest, Method};
use serde::Serialize;
use serde_json::Value;

use crate::EndpointError;

/// Default base URL of the Edgegap deployment API.
pub const DEFAULT_API_URL: &str = "https://api.edgegap.com";

/// Describes one API call: how to build the request and what model the
/// success body decodes into.
///
/// Implementors are plain data (ids, URLs, tokens, payloads). All the
/// request/parse/signal plumbing lives once in `RequestAction`.
///
/// # Example
///
/// ```rust
/// use edgegap_action::{Endpoint, EndpointError, MatchmakerTarget};
/// use edgegap_models::Acknowledgement;
/// use edgegap_transport::{HttpRequest, Method};
///
/// /// Pings the matchmaker's health route.
/// struct Health(MatchmakerTarget);
///
/// impl Endpoint for Health {
///     type Response = Acknowledgement;
///     const NAME: &'static str = "health";
///
///     fn into_request(self) -> Result<HttpRequest, EndpointError> {
///         self.0.request(Method::Get, "/health")
///     }
/// }
/// ```
pub trait Endpoint: Send + 'static {
    /// The model a 2xx body decodes into.
    type Response: ResponseModel;

    /// Short name used in log fields.
    const NAME: &'static str;

    /// Builds the outbound request. Called exactly once, at activation.
    ///
    /// # Errors
    /// Returns an [`EndpointError`] if a required parameter is empty or
    /// the body cannot be serialized.
    fn into_request(self) -> Result<HttpRequest, EndpointError>;
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// A game's matchmaker: base URL plus its auth token.
///
/// The matchmaker expects the token as the bare `Authorization` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchmakerTarget {
    pub url: String,
    pub auth_token: Secret,
}

impl MatchmakerTarget {
    pub fn new(url: impl Into<String>, auth_token: impl Into<Secret>) -> Self {
        Self {
            url: url.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Builds an authorized request for `path` on this matchmaker.
    ///
    /// # Errors
    /// [`EndpointError::MissingParameter`] if the URL is empty.
    pub fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<HttpRequest, EndpointError> {
        let url = join_url(&self.url, path, "matchmaking_url")?;
        Ok(HttpRequest::new(method, url)
            .authorization(Authorization::bare(self.auth_token.clone())))
    }
}

/// The Edgegap deployment API: base URL plus an API token.
///
/// The API expects `Authorization: token <key>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTarget {
    pub url: String,
    pub api_token: Secret,
}

impl ApiTarget {
    /// Targets the public API at [`DEFAULT_API_URL`].
    pub fn new(api_token: impl Into<Secret>) -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            api_token: api_token.into(),
        }
    }

    /// Overrides the base URL (staging, self-hosted proxy, tests).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builds an authorized request for `path` on the API.
    ///
    /// # Errors
    /// [`EndpointError::MissingParameter`] if the URL is empty.
    pub fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<HttpRequest, EndpointError> {
        let url = join_url(&self.url, path, "api_url")?;
        Ok(HttpRequest::new(method, url).authorization(
            Authorization::with_scheme("token", self.api_token.clone()),
        ))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Joins a base URL and an absolute path, tolerating a trailing slash on
/// the base.
fn join_url(
    base: &str,
    path: &str,
    param: &'static str,
) -> Result<String, EndpointError> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(EndpointError::MissingParameter(param));
    }
    Ok(format!("{base}{path}"))
}

/// Rejects empty path identifiers; `/tickets/` would hit a different route.
pub(crate) fn require<'a>(
    value: &'a str,
    param: &'static str,
) -> Result<&'a str, EndpointError> {
    let value = value.trim();
    if value.is_empty() {
        Err(EndpointError::MissingParameter(param))
    } else {
        Ok(value)
    }
}

/// [`require`]s an identifier that is spliced into a URL path.
///
/// Ids containing `/`, `?`, `#`, `%`, `\`, whitespace or control characters
/// are rejected rather than escaped, since no Edgegap id contains them.
pub(crate) fn path_segment<'a>(
    value: &'a str,
    param: &'static str,
) -> Result<&'a str, EndpointError> {
    let value = require(value, param)?;
    let reserved = |c: char| {
        matches!(c, '/' | '?' | '#' | '%' | '\\')
            || c.is_whitespace()
            || c.is_control()
    };
    if value.contains(reserved) || value == "." || value == ".." {
        return Err(EndpointError::InvalidPathSegment(param));
    }
    Ok(value)
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value, EndpointError> {
    serde_json::to_value(value).map_err(EndpointError::Encode)
}
