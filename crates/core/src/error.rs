use thiserror::Error;

/// Errors raised while constructing or assembling a message.
///
/// All of these are detected eagerly, before anything touches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A required value is missing or a component invariant is violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A raw value is not a recognized component.
    #[error("invalid component: {0}")]
    InvalidComponent(String),
}

impl MessageError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_component(msg: impl Into<String>) -> Self {
        Self::InvalidComponent(msg.into())
    }
}
