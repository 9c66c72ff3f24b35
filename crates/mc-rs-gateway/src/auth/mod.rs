//! Client login: identity verification, encryption handshake and the
//! backend sign-in chosen by `[remote] auth_type`.
//!
//! ```text
//! Unvalidated ─Login─→ IdentityVerified ─handshake─→ EncryptionEstablished
//!     ─(online)→ AwaitingUserConsent ─→ AwaitingExternalAuth ─┐
//!     ─(offline / passthrough)────────────────────────────────┴→ Authenticated
//! ```
//!
//! Any state can drop to `Disconnected`.

pub mod device_code;
pub mod encryption;
pub mod forms;
pub mod identity;

pub use device_code::{DeviceCode, DeviceCodeEvent, DeviceCodeFlow};
pub use forms::{FormTracker, PendingForm};
pub use identity::{
    flip_to_negative, mojang_public_key, name_uuid, offline_uuid, offline_xuid, verify_identity,
    VerifiedIdentity,
};

use mc_rs_crypto::PublicKey;
use mc_rs_proto::java::{GameProfile, Hello};
use mc_rs_proto::jwt::ClientData;
use mc_rs_proto::types::Uuid;
use tracing::info;

use crate::config::AuthType;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unvalidated,
    IdentityVerified,
    EncryptionEstablished,
    /// Sign-in notice or consent form on screen.
    AwaitingUserConsent,
    /// Device-code exchange running outside the session.
    AwaitingExternalAuth,
    Authenticated,
    Disconnected,
}

impl AuthState {
    pub fn is_authenticated(self) -> bool {
        self == Self::Authenticated
    }
}

/// Who the Bedrock client says it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthData {
    pub name: String,
    pub uuid: Uuid,
    pub xuid: String,
}

/// Per-session login state.
#[derive(Debug, Default)]
pub struct AuthSession {
    pub state: AuthState,
    pub data: Option<AuthData>,
    /// The chain is signed by the trusted root.
    pub signed: bool,
    pub identity_key: Option<PublicKey>,
    pub client_data: Option<ClientData>,
    /// Raw certificate chain; dropped once the backend accepts the login.
    pub chain: Vec<String>,
    pub forms: FormTracker,
}

impl AuthSession {
    pub fn accept_identity(&mut self, identity: VerifiedIdentity, chain: Vec<String>) {
        self.data = Some(identity.data);
        self.signed = identity.signed;
        self.identity_key = Some(identity.identity_key);
        self.client_data = Some(identity.client_data);
        self.chain = chain;
        self.state = AuthState::IdentityVerified;
    }

    /// Forget everything; the session is over.
    pub fn clear(&mut self) {
        *self = Self {
            state: AuthState::Disconnected,
            ..Self::default()
        };
    }
}

/// Encryption is up: sign the player into the backend the configured way.
pub fn begin_authentication(session: &mut Session) {
    let Some(data) = session.auth.data.clone() else {
        session.disconnect("disconnectionScreen.internalError.cantConnect");
        return;
    };

    match session.auth_type() {
        AuthType::Offline => {
            let profile = GameProfile {
                id: offline_uuid(&data.name),
                name: data.name,
            };
            complete_authentication(session, profile);
        }
        AuthType::Passthrough => {
            let profile = GameProfile {
                id: data.uuid,
                name: data.name,
            };
            complete_authentication(session, profile);
        }
        AuthType::Online => {
            if session.context().device_code.is_none() {
                let reason = session.translate("gateway.auth.login.unavailable", &[]);
                session.disconnect(&reason);
                return;
            }
            forms::show_notice(session);
        }
    }
}

/// The player has a Java profile; start the backend login with it.
pub fn complete_authentication(session: &mut Session, profile: GameProfile) {
    if session.is_closed() {
        return;
    }
    info!(
        "{} authenticated as {} ({}, {} mode)",
        session.display_name(),
        profile.name,
        profile.id,
        session.auth_type()
    );
    session.auth.state = AuthState::Authenticated;
    session.auth.forms.clear();
    session.send_downstream(Hello {
        name: profile.name,
        profile_id: profile.id,
    });
}
