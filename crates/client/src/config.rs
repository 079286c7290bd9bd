use std::time::Duration;

use lilyhook_core::Override;
use serde::Deserialize;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// One webhook URL or an ordered list of them.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    One(String),
    Many(Vec<String>),
}

impl Targets {
    /// Target URLs in delivery order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(url) => std::slice::from_ref(url),
            Self::Many(urls) => urls,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl std::fmt::Debug for Targets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Webhook URLs embed their token.
        f.debug_struct("Targets")
            .field("count", &self.len())
            .field("urls", &"[REDACTED]")
            .finish()
    }
}

impl From<&str> for Targets {
    fn from(url: &str) -> Self {
        Self::One(url.to_owned())
    }
}

impl From<String> for Targets {
    fn from(url: String) -> Self {
        Self::One(url)
    }
}

impl From<Vec<String>> for Targets {
    fn from(urls: Vec<String>) -> Self {
        Self::Many(urls)
    }
}

impl From<Vec<&str>> for Targets {
    fn from(urls: Vec<&str>) -> Self {
        Self::Many(urls.into_iter().map(str::to_owned).collect())
    }
}

/// Configuration for a [`WebhookClient`](crate::WebhookClient).
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Webhook URL(s) to deliver to.
    #[serde(default)]
    pub targets: Targets,

    /// Username override, uniform or per target.
    #[serde(default)]
    pub username: Option<Override>,

    /// Avatar URL override, uniform or per target.
    #[serde(default)]
    pub avatar_url: Option<Override>,

    /// Request timeout. Read from `timeout_seconds`; zero disables it.
    #[serde(
        rename = "timeout_seconds",
        default = "default_timeout",
        deserialize_with = "timeout_from_secs"
    )]
    pub timeout: Duration,

    /// `User-Agent` header sent with every request.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)
}

fn timeout_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            targets: Targets::default(),
            username: None,
            avatar_url: None,
            timeout: default_timeout(),
            user_agent: None,
        }
    }
}

impl WebhookConfig {
    /// Create a new configuration for the given target(s).
    pub fn new(targets: impl Into<Targets>) -> Self {
        Self {
            targets: targets.into(),
            ..Self::default()
        }
    }

    /// Set the username override.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<Override>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the avatar URL override.
    #[must_use]
    pub fn with_avatar_url(mut self, url: impl Into<Override>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the request timeout. A zero duration disables it.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The request timeout, or `None` when it is disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }
}
