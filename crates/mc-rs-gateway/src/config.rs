use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub bedrock: BedrockSection,
    pub remote: RemoteSection,
    #[serde(default)]
    pub auth: AuthSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Where Bedrock clients connect.
#[derive(Debug, Clone, Deserialize)]
pub struct BedrockSection {
    pub address: String,
    pub port: u16,
    #[serde(default = "default_motd")]
    pub motd: String,
}

fn default_motd() -> String {
    "MC-RS Gateway".into()
}

/// The Java backend every session is relayed to.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSection {
    pub address: String,
    #[serde(default = "default_remote_port")]
    pub port: u16,
    #[serde(default)]
    pub auth_type: AuthType,
}

fn default_remote_port() -> u16 {
    25565
}

/// How the gateway logs players into the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Java account sign-in through the device-code flow.
    #[default]
    Online,
    /// No backend authentication; the backend runs in offline mode.
    Offline,
    /// Forward the Bedrock identity as-is (proxy-forwarded backends).
    Passthrough,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Passthrough => "passthrough",
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSection {
    /// Reject clients whose identity chain is not signed by the root key.
    #[serde(default)]
    pub require_signed_identity: bool,
    /// Seconds a client may spend in the sign-in forms. 0 = no limit.
    #[serde(default = "default_pending_authentication_timeout")]
    pub pending_authentication_timeout: u64,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Players asked for consent to keep their Java sign-in token.
    #[serde(default)]
    pub saved_user_logins: Vec<String>,
}

fn default_pending_authentication_timeout() -> u64 {
    120
}

fn default_locale() -> String {
    "en_US".into()
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            require_signed_identity: false,
            pending_authentication_timeout: default_pending_authentication_timeout(),
            default_locale: default_locale(),
            saved_user_logins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl GatewayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        if config.remote.address.trim().is_empty() {
            return Err(ConfigError::Invalid("remote.address is empty".into()));
        }
        Ok(config)
    }
}
