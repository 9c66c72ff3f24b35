//! Login-phase packets: identity payload, encryption handshake, status and
//! disconnect.

use crate::error::ProtoError;
use crate::jwt;

/// Login (0x01) — Client → Server.
///
/// Carries the client's protocol version, the identity certificate chain
/// and the client data JWT (skin, device info, locale).
#[derive(Debug, Clone)]
pub struct Login {
    pub protocol_version: i32,
    /// JWT strings from the identity chain, root first.
    pub chain: Vec<String>,
    /// Raw client data JWT.
    pub client_data_jwt: String,
}

impl Login {
    /// Build from the decoded chain JSON (`{"chain": [...]}`).
    pub fn from_chain_json(
        protocol_version: i32,
        chain_json: &str,
        client_data_jwt: impl Into<String>,
    ) -> Result<Self, ProtoError> {
        Ok(Self {
            protocol_version,
            chain: jwt::parse_chain_json(chain_json)?,
            client_data_jwt: client_data_jwt.into(),
        })
    }
}

/// ServerToClientHandshake (0x03) — Server → Client.
///
/// JWT signed with ES384 carrying the server public key and a random salt.
#[derive(Debug, Clone)]
pub struct ServerToClientHandshake {
    pub jwt: String,
}

/// ClientToServerHandshake (0x04) — Client → Server. Empty body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientToServerHandshake;

/// PlayStatus status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlayStatusType {
    LoginSuccess = 0,
    FailedClient = 1,
    FailedServer = 2,
    PlayerSpawn = 3,
}

/// PlayStatus (0x02) — Server → Client.
#[derive(Debug, Clone)]
pub struct PlayStatus {
    pub status: PlayStatusType,
}

/// Disconnect (0x05) — Server → Client.
#[derive(Debug, Clone)]
pub struct Disconnect {
    /// If true, the client shows no disconnect screen.
    pub hide_disconnect_screen: bool,
    /// Message shown on the disconnect screen.
    pub message: Option<String>,
}

impl Disconnect {
    /// Create a disconnect with a visible message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            hide_disconnect_screen: false,
            message: Some(message.into()),
        }
    }

    /// Create a silent disconnect (no screen shown).
    pub fn silent() -> Self {
        Self {
            hide_disconnect_screen: true,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_from_chain_json() {
        let login = Login::from_chain_json(924, r#"{"chain":["a.b.c"]}"#, "x.y.z").unwrap();
        assert_eq!(login.protocol_version, 924);
        assert_eq!(login.chain.len(), 1);
        assert_eq!(login.client_data_jwt, "x.y.z");
    }

    #[test]
    fn login_rejects_bad_chain() {
        assert!(Login::from_chain_json(924, "{}", "x.y.z").is_err());
    }

    #[test]
    fn disconnect_variants() {
        let visible = Disconnect::with_message("Server closed");
        assert!(!visible.hide_disconnect_screen);
        assert_eq!(visible.message.as_deref(), Some("Server closed"));
        let silent = Disconnect::silent();
        assert!(silent.hide_disconnect_screen);
        assert!(silent.message.is_none());
    }
}
