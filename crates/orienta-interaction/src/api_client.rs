//! HTTP client for the Orienta REST API.
//!
//! Wraps a `reqwest::Client` with the base URL, the request timeout and
//! the current session cookie, and maps every failure onto
//! `OrientaError`.

use crate::dto::{Envelope, ErrorBody};
use orienta_core::config::ClientConfig;
use orienta_core::error::{DEFAULT_ACTION, OrientaError, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Name of the cookie the backend issues on login.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Shared REST client.
///
/// Clones share the session cookie, so a login performed through one
/// service is visible to every other service built from the same client.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session_cookie: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Creates a client from the configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| OrientaError::config(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(client, config.normalized_base_url())
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            OrientaError::config(format!("Invalid API base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(OrientaError::config(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }

        tracing::debug!("[ApiClient] Using API at {}", base_url);
        Ok(Self {
            client,
            base_url,
            session_cookie: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn set_session_cookie(&self, cookie: Option<String>) {
        *self.session_cookie.write().await = cookie;
    }

    pub async fn has_session(&self) -> bool {
        self.session_cookie.read().await.is_some()
    }

    /// Builds an endpoint URL from path segments, percent-encoding each.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| OrientaError::config("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Attaches the session cookie, if any.
    async fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session_cookie.read().await.as_deref() {
            Some(cookie) => request.header(
                reqwest::header::COOKIE,
                format!("{SESSION_COOKIE_NAME}={cookie}"),
            ),
            None => request,
        }
    }

    /// Sends a request and returns the response if its status is a success.
    pub async fn execute<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        tracing::debug!("[ApiClient] {} {}", method, url.path());

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = self.auth_request(request).await;

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body_text = response.text().await.unwrap_or_default();
        let err = map_http_error(status, &body_text, url.path());
        tracing::warn!("[ApiClient] {} {} failed: {}", method, url.path(), err);
        Err(err)
    }

    /// Sends a request and decodes the success envelope.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(method, segments, body).await?;
        decode_envelope(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Envelope<T>> {
        self.send_json::<(), T>(Method::GET, segments, None).await
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, segments, Some(body)).await
    }

    pub async fn patch<B, T>(&self, segments: &[&str], body: &B) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, segments, Some(body)).await
    }

    /// Sends a `DELETE`; the response body is ignored.
    pub async fn delete(&self, segments: &[&str]) -> Result<()> {
        self.execute::<()>(Method::DELETE, segments, None).await?;
        Ok(())
    }
}

async fn decode_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>> {
    let bytes = response.bytes().await.map_err(map_transport_error)?;
    if bytes.is_empty() {
        return Ok(Envelope {
            message: String::new(),
            data: None,
        });
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| OrientaError::malformed(format!("Failed to decode response: {e}")))
}

/// Maps a `reqwest` failure that produced no response.
pub fn map_transport_error(err: reqwest::Error) -> OrientaError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    OrientaError::transport(format!("{kind}: {err}"))
}

/// Maps a non-success status and its body onto `OrientaError`.
pub fn map_http_error(status: StatusCode, body: &str, path: &str) -> OrientaError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let message = if parsed.message.trim().is_empty() {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    } else {
        parsed.message
    };
    let action = if parsed.action.trim().is_empty() {
        DEFAULT_ACTION.to_string()
    } else {
        parsed.action
    };

    match status {
        StatusCode::BAD_REQUEST => OrientaError::Validation { message, action },
        StatusCode::UNAUTHORIZED => OrientaError::Unauthorized { message, action },
        StatusCode::NOT_FOUND => OrientaError::not_found("resource", path),
        _ => OrientaError::Rejected {
            status: status.as_u16(),
            name: parsed.name,
            message,
            action,
        },
    }
}
