//! Server side of the client encryption handshake.

use std::sync::atomic::{AtomicBool, Ordering};

use mc_rs_crypto::{create_handshake_jwt, HandshakeKeyPair, PacketEncryption};
use mc_rs_proto::bedrock::ServerToClientHandshake;
use tracing::{debug, info, warn};

use super::AuthState;
use crate::error::AuthError;
use crate::locale::Locale;
use crate::session::{Session, SessionPhase};

static HAS_WARNED_ENCRYPTION: AtomicBool = AtomicBool::new(false);

/// Send the handshake JWT and switch the client connection to encrypted
/// transport. Failure ends the session.
pub fn start_handshake(session: &mut Session) {
    match perform_handshake(session) {
        Ok(()) => {
            session.set_phase(SessionPhase::Handshake);
            session.auth.state = AuthState::EncryptionEstablished;
            info!(
                "Sent ServerToClientHandshake to {}, awaiting client confirmation",
                session.display_name()
            );
        }
        Err(e) => {
            debug!("Encryption handshake with {} failed: {e}", session.display_name());
            let ctx = session.context();
            warn_encryption_once(ctx.locale.as_ref(), &ctx.auth.default_locale);
            session.disconnect(e.disconnect_reason());
        }
    }
}

fn perform_handshake(session: &mut Session) -> Result<(), AuthError> {
    let client_key = session
        .auth
        .identity_key
        .as_ref()
        .ok_or_else(|| AuthError::Encryption("no identity key".into()))?;

    let server = HandshakeKeyPair::generate();
    let token: [u8; 16] = rand::random();
    let jwt = create_handshake_jwt(&server, &token)
        .map_err(|e| AuthError::Encryption(e.to_string()))?;
    let key = server.encryption_key(client_key, &token);

    // The handshake itself travels in the clear.
    session
        .upstream
        .send_immediately(ServerToClientHandshake { jwt }.into());
    session.upstream.enable_encryption(PacketEncryption::new(&key));
    Ok(())
}

/// Tell the operator about handshake failures, once per process. Returns
/// whether this call printed the warning.
pub fn warn_encryption_once(locale: &dyn Locale, language: &str) -> bool {
    if HAS_WARNED_ENCRYPTION
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return false;
    }
    warn!("{}", locale.translate("gateway.network.encryption.line_1", language, &[]));
    warn!("{}", locale.translate("gateway.network.encryption.line_2", language, &[]));
    true
}
