use std::sync::Arc;

use mc_rs_proto::bedrock::{
    ClientToServerHandshake, Login, ModalFormResponse, PlayStatus, PlayStatusType,
};
use tracing::{info, warn};

use crate::auth::{begin_authentication, encryption, forms, verify_identity};
use crate::error::TranslateError;
use crate::session::{Session, SessionPhase};

pub(super) fn login(session: &mut Session, packet: &Login) -> Result<(), TranslateError> {
    if session.phase() != SessionPhase::Unauthenticated {
        return Err(TranslateError::UnexpectedPhase(format!(
            "Login in {:?}",
            session.phase()
        )));
    }

    let ctx = Arc::clone(session.context());
    let identity = match verify_identity(
        packet,
        &ctx.trusted_root,
        ctx.auth.require_signed_identity,
    ) {
        Ok(identity) => identity,
        Err(e) => {
            warn!("Login from {} rejected: {e}", session.remote_address());
            session.disconnect(e.disconnect_reason());
            return Ok(());
        }
    };

    info!(
        "{} logged in as {} (xuid {}, {})",
        session.remote_address(),
        identity.data.name,
        identity.data.xuid,
        if identity.signed { "signed" } else { "unsigned" }
    );
    session.auth.accept_identity(identity, packet.chain.clone());
    encryption::start_handshake(session);
    Ok(())
}

pub(super) fn client_to_server_handshake(
    session: &mut Session,
    _packet: &ClientToServerHandshake,
) -> Result<(), TranslateError> {
    if session.phase() != SessionPhase::Handshake {
        return Err(TranslateError::UnexpectedPhase(format!(
            "ClientToServerHandshake in {:?}",
            session.phase()
        )));
    }
    session.set_phase(SessionPhase::Encrypted);
    session.send_upstream(PlayStatus {
        status: PlayStatusType::LoginSuccess,
    });
    begin_authentication(session);
    Ok(())
}

pub(super) fn modal_form_response(
    session: &mut Session,
    packet: &ModalFormResponse,
) -> Result<(), TranslateError> {
    forms::handle_response(session, packet);
    Ok(())
}
