//! Server configuration types

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub slack: SlackSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Slack app credentials
///
/// Empty strings mean "not configured".
#[derive(Clone, Serialize, Deserialize)]
pub struct SlackSettings {
    /// Bot token (`xoxb-...`) for Web API calls
    #[serde(default)]
    pub bot_token: String,
    /// Legacy verification token compared against every Events API envelope
    #[serde(default)]
    pub verification_token: String,
    /// Signing secret for `X-Slack-Signature` checks
    #[serde(default)]
    pub signing_secret: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    slackline_api::DEFAULT_BASE_URL.to_string()
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            verification_token: String::new(),
            signing_secret: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl std::fmt::Debug for SlackSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackSettings")
            .field("bot_token", &mask(&self.bot_token))
            .field("verification_token", &mask(&self.verification_token))
            .field("signing_secret", &mask(&self.signing_secret))
            .field("client_id", &self.client_id)
            .field("client_secret", &mask(&self.client_secret))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "[REDACTED]"
    }
}
