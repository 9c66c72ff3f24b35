//! Gateway error types.

use mc_rs_proto::error::ProtoError;
use thiserror::Error;

use crate::registry::Direction;

/// Problems loading `gateway.toml`. Fatal at start-up.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Translator table construction errors. Fatal at start-up.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{direction} translator for {kind} registered twice")]
    Duplicate { direction: Direction, kind: String },
}

/// A single packet failed to translate. Logged at the dispatch boundary;
/// the session keeps running.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("packet arrived in the wrong phase: {0}")]
    UnexpectedPhase(String),

    #[error("{0}")]
    Invalid(String),
}

/// Login failures. Fatal to the session; the client sees
/// [`AuthError::disconnect_reason`].
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed identity chain: {0}")]
    MalformedChain(String),

    #[error("identity chain signature does not verify")]
    ChainSignature,

    #[error("identity chain is not signed and signed identities are required")]
    UnsignedIdentity,

    #[error("signed identity carries no XUID")]
    MissingXuid,

    #[error("client data is not signed by the identity key")]
    ClientDataSignature,

    #[error("encryption handshake failed: {0}")]
    Encryption(String),

    #[error(transparent)]
    Proto(#[from] ProtoError),
}

impl AuthError {
    /// Locale key shown to the client on disconnect.
    pub fn disconnect_reason(&self) -> &'static str {
        match self {
            Self::UnsignedIdentity => "disconnectionScreen.notAuthenticated",
            Self::Encryption(_) => "disconnectionScreen.internalError.encryption",
            _ => "disconnectionScreen.internalError.cantConnect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_direction_and_kind() {
        let err = RegistryError::Duplicate {
            direction: Direction::Bedrock,
            kind: "Login".into(),
        };
        assert_eq!(err.to_string(), "bedrock translator for Login registered twice");
    }

    #[test]
    fn auth_disconnect_reasons() {
        assert_eq!(
            AuthError::ChainSignature.disconnect_reason(),
            "disconnectionScreen.internalError.cantConnect"
        );
        assert_eq!(
            AuthError::UnsignedIdentity.disconnect_reason(),
            "disconnectionScreen.notAuthenticated"
        );
    }
}
