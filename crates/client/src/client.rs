use std::sync::Arc;

use lilyhook_core::{EmbedInput, MessageParts, Override, Overrides, WebhookPayload, assemble};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::attachment::Attachment;
use crate::config::{Targets, WebhookConfig};
use crate::error::WebhookError;
use crate::transport::{
    HttpMethod, HttpTransport, RequestBody, Transport, TransportResponse, WebhookRequest,
};
use crate::types::{DispatchResult, WebhookMessageResponse};

/// Sends and edits messages through one or more webhooks.
///
/// The transport session is opened on the first request and reused until
/// [`close`](Self::close) is called. Multiple targets are delivered to one at
/// a time, in order; the first failure aborts the remaining targets.
pub struct WebhookClient<T: Transport = HttpTransport> {
    targets: Targets,
    username: Option<Override>,
    avatar_url: Option<Override>,
    transport: T,
    session: Mutex<Option<Arc<T::Session>>>,
}

impl WebhookClient<HttpTransport> {
    /// Create a client for the given target(s) with default settings.
    pub fn new(targets: impl Into<Targets>) -> Result<Self, WebhookError> {
        Self::from_config(WebhookConfig::new(targets))
    }

    /// Create a client backed by `reqwest`.
    pub fn from_config(config: WebhookConfig) -> Result<Self, WebhookError> {
        let transport = HttpTransport::new(&config);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> WebhookClient<T> {
    /// Create a client that performs requests through `transport`.
    pub fn with_transport(config: WebhookConfig, transport: T) -> Result<Self, WebhookError> {
        if config.targets.is_empty() {
            return Err(WebhookError::InvalidArgument(
                "at least one webhook url is required".into(),
            ));
        }
        if config.targets.as_slice().iter().any(String::is_empty) {
            return Err(WebhookError::InvalidArgument("webhook url is empty".into()));
        }
        if let Some(username) = &config.username {
            username.ensure_present("username")?;
        }
        if let Some(avatar_url) = &config.avatar_url {
            avatar_url.ensure_present("avatar url")?;
        }

        Ok(Self {
            targets: config.targets,
            username: config.username,
            avatar_url: config.avatar_url,
            transport,
            session: Mutex::new(None),
        })
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn username(&self) -> Option<&Override> {
        self.username.as_ref()
    }

    pub fn avatar_url(&self) -> Option<&Override> {
        self.avatar_url.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the username override.
    pub fn set_username(&mut self, username: impl Into<Override>) -> Result<(), WebhookError> {
        let username = username.into();
        username.ensure_present("username")?;
        self.username = Some(username);
        Ok(())
    }

    /// Replace the avatar URL override.
    pub fn set_avatar_url(&mut self, url: impl Into<Override>) -> Result<(), WebhookError> {
        let url = url.into();
        url.ensure_present("avatar url")?;
        self.avatar_url = Some(url);
        Ok(())
    }

    /// Whether a transport session is currently open.
    pub async fn is_open(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Send a message to every target, in order.
    ///
    /// Returns one result per target. Everything is validated before the
    /// first request; after that, the first failing target aborts delivery
    /// and the targets before it have already received the message.
    #[instrument(skip_all, fields(targets = self.targets.len()))]
    pub async fn send(
        &self,
        parts: MessageParts<'_>,
        mut attachment: Option<&mut Attachment<'_>>,
    ) -> Result<Vec<DispatchResult>, WebhookError> {
        if parts.is_empty() {
            return Err(WebhookError::InvalidArgument(
                "either content, embed, or components must be provided".into(),
            ));
        }
        if let Some(file) = attachment.as_deref()
            && file.is_closed()
        {
            return Err(WebhookError::InvalidArgument(format!(
                "attachment {} is closed",
                file.name()
            )));
        }

        let urls = self.targets.as_slice();
        self.check_overrides(urls.len())?;
        let payloads = (0..urls.len())
            .map(|index| assemble(&parts, &self.overrides(), index))
            .collect::<Result<Vec<_>, _>>()?;
        let query = if parts.components.is_some() {
            "wait=true&with_components=true"
        } else {
            "wait=true"
        };

        let session = self.session().await?;
        let mut results = Vec::with_capacity(urls.len());

        for (index, (url, payload)) in urls.iter().zip(payloads).enumerate() {
            let body = encode(&payload, attachment.as_deref_mut())?;
            let request = WebhookRequest {
                method: HttpMethod::Post,
                url: endpoint_url(url, None, query),
                body,
            };

            debug!(
                target_index = index,
                rich = payload.is_rich_layout(),
                "posting webhook message"
            );

            match self.dispatch(&session, request).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(
                        target_index = index,
                        delivered = results.len(),
                        error = %e,
                        "webhook delivery failed, remaining targets skipped"
                    );
                    return Err(e);
                }
            }
        }

        info!(delivered = results.len(), "webhook message sent");
        Ok(results)
    }

    /// Send a message through a client bound to exactly one target.
    pub async fn send_one(
        &self,
        parts: MessageParts<'_>,
        attachment: Option<&mut Attachment<'_>>,
    ) -> Result<DispatchResult, WebhookError> {
        self.ensure_single_target("send_one")?;
        let mut results = self.send(parts, attachment).await?;
        results.pop().ok_or_else(|| {
            WebhookError::InvalidResponse("no result for the only target".into())
        })
    }

    /// Edit a message previously sent through this webhook.
    ///
    /// Only content and embeds can be edited; the client must be bound to
    /// exactly one target.
    #[instrument(skip_all, fields(message_id = message_id))]
    pub async fn edit(
        &self,
        message_id: u64,
        content: Option<&str>,
        embeds: Option<&EmbedInput>,
    ) -> Result<DispatchResult, WebhookError> {
        self.ensure_single_target("edit")?;
        if content.is_none() && embeds.is_none() {
            return Err(WebhookError::InvalidArgument(
                "either content or embed must be provided".into(),
            ));
        }

        self.check_overrides(1)?;
        let parts = MessageParts {
            content,
            embeds,
            components: None,
        };
        let payload = assemble(&parts, &self.overrides(), 0)?;
        let url = endpoint_url(
            &self.targets.as_slice()[0],
            Some(&format!("messages/{message_id}")),
            "wait=true",
        );

        let session = self.session().await?;
        let request = WebhookRequest {
            method: HttpMethod::Patch,
            url,
            body: encode(&payload, None)?,
        };

        debug!("editing webhook message");
        let result = self.dispatch(&session, request).await?;
        info!(message_id = result.message_id, "webhook message edited");
        Ok(result)
    }

    /// Drop the transport session. Safe to call repeatedly, and before any
    /// session was opened.
    pub async fn close(&self) {
        if self.session.lock().await.take().is_some() {
            debug!("webhook transport session closed");
        }
    }

    async fn session(&self) -> Result<Arc<T::Session>, WebhookError> {
        let mut guard = self.session.lock().await;
        if let Some(session) = guard.as_ref() {
            return Ok(Arc::clone(session));
        }
        let session = Arc::new(self.transport.open()?);
        debug!("webhook transport session opened");
        *guard = Some(Arc::clone(&session));
        Ok(session)
    }

    async fn dispatch(
        &self,
        session: &T::Session,
        request: WebhookRequest,
    ) -> Result<DispatchResult, WebhookError> {
        let response = self.transport.execute(session, request).await?;
        interpret_response(response)
    }

    fn overrides(&self) -> Overrides<'_> {
        Overrides {
            username: self.username.as_ref(),
            avatar_url: self.avatar_url.as_ref(),
        }
    }

    fn check_overrides(&self, target_count: usize) -> Result<(), WebhookError> {
        if let Some(username) = &self.username {
            username.check_alignment("username", target_count)?;
        }
        if let Some(avatar_url) = &self.avatar_url {
            avatar_url.check_alignment("avatar url", target_count)?;
        }
        Ok(())
    }

    fn ensure_single_target(&self, operation: &str) -> Result<(), WebhookError> {
        if self.targets.len() == 1 {
            Ok(())
        } else {
            Err(WebhookError::UnsupportedOperation(format!(
                "{operation} supports only one target, this client has {}",
                self.targets.len()
            )))
        }
    }
}

impl<T: Transport> std::fmt::Debug for WebhookClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookClient")
            .field("targets", &self.targets)
            .field("username", &self.username)
            .field("avatar_url", &self.avatar_url)
            .finish_non_exhaustive()
    }
}

fn encode(
    payload: &WebhookPayload,
    attachment: Option<&mut Attachment<'_>>,
) -> Result<RequestBody, WebhookError> {
    let payload_json = serde_json::to_string(payload)
        .map_err(|e| WebhookError::Serialization(format!("failed to serialize payload: {e}")))?;

    match attachment {
        Some(file) => Ok(RequestBody::Multipart {
            payload_json,
            file_name: file.name().to_owned(),
            file: file.read_for_dispatch()?,
        }),
        None => Ok(RequestBody::Json(payload_json)),
    }
}

/// Turn a raw response into a [`DispatchResult`], surfacing non-success
/// statuses as [`WebhookError::HttpStatus`].
fn interpret_response(response: TransportResponse) -> Result<DispatchResult, WebhookError> {
    if !response.is_success() {
        warn!(status = response.status, "webhook endpoint returned an error status");
        return Err(WebhookError::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }

    let message: WebhookMessageResponse = serde_json::from_str(&response.body)
        .map_err(|e| WebhookError::InvalidResponse(format!("failed to parse message: {e}")))?;
    Ok(message.into())
}

/// Build `{target}[/{path}]?{query}`, keeping any query already on the
/// target (such as `thread_id`).
fn endpoint_url(target: &str, path: Option<&str>, query: &str) -> String {
    let (base, existing) = match target.split_once('?') {
        Some((base, existing)) => (base, Some(existing)),
        None => (target, None),
    };
    let base = base.trim_end_matches('/');

    let mut url = match path {
        Some(path) => format!("{base}/{path}"),
        None => base.to_owned(),
    };
    url.push('?');
    if let Some(existing) = existing.filter(|q| !q.is_empty()) {
        url.push_str(existing);
        url.push('&');
    }
    url.push_str(query);
    url
}
