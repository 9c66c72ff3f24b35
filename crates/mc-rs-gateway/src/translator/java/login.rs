use mc_rs_proto::java::{
    ClientInformation, CustomPayload, Disconnect, FinishConfiguration, FinishConfigurationAck,
    HandPreference, JoinGame, KeepAlive, KeepAliveResponse, LoginFinished,
};
use tracing::info;

use crate::error::TranslateError;
use crate::session::{Session, SessionPhase};

const BRAND: &str = "mc-rs-gateway";
const DEFAULT_VIEW_DISTANCE: u8 = 8;

pub(super) fn login_finished(
    session: &mut Session,
    packet: &LoginFinished,
) -> Result<(), TranslateError> {
    if session.phase() != SessionPhase::Encrypted || !session.auth_state().is_authenticated() {
        return Err(TranslateError::UnexpectedPhase(format!(
            "LoginFinished in {:?}",
            session.phase()
        )));
    }

    let profile = &packet.profile;
    session.player.username = Some(profile.name.clone());
    session.register(profile.id);

    // Nothing reads these after login.
    session.auth.chain.clear();
    if let Some(client_data) = session.auth.client_data.as_mut() {
        client_data.original_string = None;
    }

    session.set_phase(SessionPhase::Configuring);
    info!("{} logged in to the backend as {}", session.remote_address(), profile.name);

    session.send_downstream(CustomPayload {
        channel: "minecraft:brand".into(),
        data: brand_payload(BRAND),
    });
    let view_distance = match session.auth.client_data.as_ref().map(|d| d.max_view_distance) {
        Some(distance) if distance > 0 => distance.clamp(2, 32) as u8,
        _ => DEFAULT_VIEW_DISTANCE,
    };
    session.send_downstream(ClientInformation {
        locale: session.locale().to_string(),
        view_distance,
        chat_colors: true,
        main_hand: HandPreference::Right,
    });
    Ok(())
}

/// String payloads are VarInt length-prefixed. The packet codec treats
/// custom payload bodies as opaque bytes, so the prefix is written here.
fn brand_payload(brand: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(brand.len() + 1);
    let mut len = brand.len() as u32;
    loop {
        let byte = (len & 0x7f) as u8;
        len >>= 7;
        if len == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
    out.extend_from_slice(brand.as_bytes());
    out
}

pub(super) fn finish_configuration(
    session: &mut Session,
    _packet: &FinishConfiguration,
) -> Result<(), TranslateError> {
    if session.phase() != SessionPhase::Configuring {
        return Err(TranslateError::UnexpectedPhase(format!(
            "FinishConfiguration in {:?}",
            session.phase()
        )));
    }
    session.send_downstream(FinishConfigurationAck);
    session.set_phase(SessionPhase::Playing);
    Ok(())
}

pub(super) fn join_game(session: &mut Session, packet: &JoinGame) -> Result<(), TranslateError> {
    session.player.entity_id = Some(packet.entity_id);
    Ok(())
}

pub(super) fn keep_alive(session: &mut Session, packet: &KeepAlive) -> Result<(), TranslateError> {
    session.send_downstream(KeepAliveResponse { id: packet.id });
    Ok(())
}

pub(super) fn disconnect(session: &mut Session, packet: &Disconnect) -> Result<(), TranslateError> {
    let reason = session.translate("gateway.network.backend_closed", &[&packet.reason]);
    session.disconnect(&reason);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthState;
    use crate::testing::TestSession;
    use mc_rs_proto::java::{GameProfile, ServerboundPacket};
    use mc_rs_proto::jwt::ClientData;
    use mc_rs_proto::types::Uuid;

    fn logged_in() -> TestSession {
        let mut test = TestSession::new();
        test.session.set_phase(SessionPhase::Encrypted);
        test.session.auth.state = AuthState::Authenticated;
        test.session.auth.chain = vec!["a.b.c".into()];
        test.session.auth.client_data = Some(ClientData {
            max_view_distance: 48,
            original_string: Some("raw".into()),
            ..ClientData::default()
        });
        test
    }

    fn finished(name: &str) -> LoginFinished {
        LoginFinished {
            profile: GameProfile {
                id: Uuid::new(5, 6),
                name: name.into(),
            },
        }
    }

    #[test]
    fn login_finished_registers_and_configures() {
        let mut test = logged_in();
        login_finished(&mut test.session, &finished("Steve")).unwrap();

        assert_eq!(test.session.phase(), SessionPhase::Configuring);
        assert_eq!(test.session.player().username.as_deref(), Some("Steve"));
        assert_eq!(test.session.player().uuid, Some(Uuid::new(5, 6)));
        assert!(test.session.context().sessions.get(&Uuid::new(5, 6)).is_some());
        assert!(test.session.auth.chain.is_empty());
        assert!(test
            .session
            .auth
            .client_data
            .as_ref()
            .unwrap()
            .original_string
            .is_none());

        let sent = test.backend.take();
        let [ServerboundPacket::CustomPayload(brand), ServerboundPacket::ClientInformation(info)] =
            sent.as_slice()
        else {
            panic!("unexpected {sent:?}");
        };
        assert_eq!(brand.channel, "minecraft:brand");
        assert_eq!(brand.data[0] as usize, BRAND.len());
        assert_eq!(&brand.data[1..], BRAND.as_bytes());
        assert_eq!(info.view_distance, 32);
        assert_eq!(info.locale, "en_US");
    }

    #[test]
    fn login_finished_before_authentication_is_rejected() {
        let mut test = TestSession::new();
        assert!(matches!(
            login_finished(&mut test.session, &finished("Steve")),
            Err(TranslateError::UnexpectedPhase(_))
        ));
        assert!(test.backend.take().is_empty());
    }

    #[test]
    fn configuration_ends_in_play() {
        let mut test = logged_in();
        login_finished(&mut test.session, &finished("Steve")).unwrap();
        test.backend.take();

        finish_configuration(&mut test.session, &FinishConfiguration).unwrap();
        assert_eq!(test.session.phase(), SessionPhase::Playing);
        assert!(matches!(
            test.backend.take().as_slice(),
            [ServerboundPacket::FinishConfigurationAck(_)]
        ));
    }

    #[test]
    fn keep_alive_is_echoed() {
        let mut test = TestSession::playing();
        keep_alive(&mut test.session, &KeepAlive { id: 42 }).unwrap();
        assert!(matches!(
            test.backend.take().as_slice(),
            [ServerboundPacket::KeepAliveResponse(r)] if r.id == 42
        ));
    }

    #[test]
    fn backend_disconnect_reaches_client() {
        let mut test = TestSession::playing();
        disconnect(
            &mut test.session,
            &Disconnect {
                reason: "Server closed".into(),
            },
        )
        .unwrap();
        assert_eq!(
            test.client.close_reason().as_deref(),
            Some("The backend server closed the connection: Server closed")
        );
    }

    #[test]
    fn brand_prefix_is_a_varint() {
        let long = "x".repeat(200);
        let payload = brand_payload(&long);
        assert_eq!(&payload[..2], &[0xc8, 0x01]);
        assert_eq!(payload.len(), 202);
    }

    #[test]
    fn join_game_records_player_entity() {
        let mut test = TestSession::playing();
        join_game(&mut test.session, &JoinGame { entity_id: 301 }).unwrap();
        assert_eq!(test.session.player().entity_id, Some(301));
    }
}
