//! HTTP transport implementation using `reqwest`.

use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

use crate::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

const USER_AGENT: &str = concat!("edgegap-kit/", env!("CARGO_PKG_VERSION"));

/// A [`HttpTransport`] backed by a pooled `reqwest::Client`.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with a fresh client.
    ///
    /// # Errors
    /// Fails if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an existing client (custom timeouts, proxies, ...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::InvalidRequest(format!("header name: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::InvalidRequest(format!("header value: {e}"))
            })?;
            builder = builder.header(name, value);
        }

        if let Some(auth) = &request.authorization {
            let mut value =
                HeaderValue::from_str(&auth.header_value()).map_err(|_| {
                    // Never echo the credential.
                    TransportError::InvalidRequest(
                        "authorization value contains invalid characters"
                            .into(),
                    )
                })?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::BodyFailed(e.to_string()))?;

        tracing::trace!(
            method = %request.method,
            url = %request.url,
            status,
            bytes = body.len(),
            "response received"
        );

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
