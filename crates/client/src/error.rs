use lilyhook_core::MessageError;
use thiserror::Error;

/// Errors returned by [`WebhookClient`](crate::WebhookClient).
#[derive(Debug, Error)]
pub enum WebhookError {
    /// A required value is missing or inconsistent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A raw value is not a recognized component.
    #[error("invalid component: {0}")]
    InvalidComponent(String),

    /// The operation is not available for this client's target set.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The webhook endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading an attachment failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The endpoint answered with a body that is not a message object.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl WebhookError {
    /// Returns `true` if the error is transient and the request may succeed
    /// on retry. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpStatus { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<MessageError> for WebhookError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            MessageError::InvalidComponent(msg) => Self::InvalidComponent(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_is_retryable() {
        let err = WebhookError::HttpStatus {
            status: 429,
            body: "too many requests".into(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn server_error_is_retryable() {
        let err = WebhookError::HttpStatus {
            status: 503,
            body: "unavailable".into(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn client_error_is_not_retryable() {
        let err = WebhookError::HttpStatus {
            status: 400,
            body: r#"{"message":"Invalid Webhook Token"}"#.into(),
        };
        assert!(!err.is_retryable());
        assert!(!WebhookError::UnsupportedOperation("edit".into()).is_retryable());
    }

    #[test]
    fn message_errors_keep_their_class() {
        let err: WebhookError = MessageError::InvalidArgument("x".into()).into();
        assert!(matches!(err, WebhookError::InvalidArgument(_)));

        let err: WebhookError = MessageError::InvalidComponent("y".into()).into();
        assert!(matches!(err, WebhookError::InvalidComponent(_)));
    }

    #[test]
    fn error_display() {
        let err = WebhookError::HttpStatus {
            status: 404,
            body: "Unknown Webhook".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Unknown Webhook");

        let err = WebhookError::UnsupportedOperation("edit supports only one target".into());
        assert_eq!(
            err.to_string(),
            "unsupported operation: edit supports only one target"
        );
    }
}
