use std::future::Future;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::config::WebhookConfig;
use crate::error::WebhookError;

/// HTTP method of a webhook request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Patch,
}

impl HttpMethod {
    /// Returns the method name as an uppercase string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// `application/json` body holding the payload.
    Json(String),
    /// `multipart/form-data` body with a `file` part and a `payload_json` part.
    Multipart {
        payload_json: String,
        file_name: String,
        file: Vec<u8>,
    },
}

impl RequestBody {
    /// The JSON payload, whichever encoding carries it.
    pub fn payload_json(&self) -> &str {
        match self {
            Self::Json(json) | Self::Multipart { payload_json: json, .. } => json,
        }
    }
}

/// A single request against a webhook endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: RequestBody,
}

impl std::fmt::Debug for WebhookRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookRequest")
            .field("method", &self.method)
            .field("url", &"[REDACTED]")
            .field("body", &self.body)
            .finish()
    }
}

/// Status and raw body of a webhook response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP collaborator used by [`WebhookClient`](crate::WebhookClient).
///
/// A transport opens sessions and performs requests on them. The client opens
/// one session lazily, reuses it for every request, and drops it on close.
/// Uses native `async fn`, so the trait is not object-safe; the client is
/// generic over it instead.
pub trait Transport: Send + Sync {
    /// Shared connection state, e.g. a connection pool.
    type Session: Send + Sync;

    /// Create a new session.
    fn open(&self) -> Result<Self::Session, WebhookError>;

    /// Perform one request and return the raw response.
    ///
    /// Non-success statuses are returned as responses, not errors.
    fn execute(
        &self,
        session: &Self::Session,
        request: WebhookRequest,
    ) -> impl Future<Output = Result<TransportResponse, WebhookError>> + Send;
}

/// [`Transport`] backed by a `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout: Option<std::time::Duration>,
    user_agent: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &WebhookConfig) -> Self {
        Self {
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Transport for HttpTransport {
    type Session = Client;

    fn open(&self) -> Result<Client, WebhookError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(builder.build()?)
    }

    async fn execute(
        &self,
        client: &Client,
        request: WebhookRequest,
    ) -> Result<TransportResponse, WebhookError> {
        let builder = match request.method {
            HttpMethod::Post => client.post(&request.url),
            HttpMethod::Patch => client.patch(&request.url),
        };

        let builder = match request.body {
            RequestBody::Json(json) => builder.header(CONTENT_TYPE, "application/json").body(json),
            RequestBody::Multipart {
                payload_json,
                file_name,
                file,
            } => {
                debug!(file_name = %file_name, size = file.len(), "attaching file");
                let form = Form::new()
                    .part("file", Part::bytes(file).file_name(file_name))
                    .text("payload_json", payload_json);
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = if response.status().is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };

        Ok(TransportResponse { status, body })
    }
}
