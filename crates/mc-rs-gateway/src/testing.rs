//! In-memory endpoints and session builders for unit tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use mc_rs_crypto::{sign_jwt, HandshakeKeyPair, PacketEncryption};
use mc_rs_proto::bedrock::{BedrockPacket, Login, PROTOCOL_VERSION};
use mc_rs_proto::java::ServerboundPacket;
use mc_rs_proto::types::Uuid;
use serde_json::json;

use crate::auth::{offline_xuid, AuthData, AuthState, DeviceCodeFlow};
use crate::config::{AuthSection, AuthType};
use crate::context::GatewayContext;
use crate::session::{
    BackendEndpoint, ClientEndpoint, Session, SessionHandle, SessionInbox, SessionPhase,
};

#[derive(Default)]
struct ClientState {
    sent: Vec<BedrockPacket>,
    encrypted: bool,
    closed: Option<String>,
}

/// Client endpoint that records what it is sent. Clones share state.
#[derive(Clone, Default)]
pub struct RecordingClient {
    state: Arc<Mutex<ClientState>>,
}

impl RecordingClient {
    /// Packets sent since the last call.
    pub fn take(&self) -> Vec<BedrockPacket> {
        std::mem::take(&mut self.state.lock().unwrap().sent)
    }

    pub fn is_encrypted(&self) -> bool {
        self.state.lock().unwrap().encrypted
    }

    pub fn close_reason(&self) -> Option<String> {
        self.state.lock().unwrap().closed.clone()
    }

    /// Simulate the client dropping the connection.
    pub fn close_now(&self) {
        self.state.lock().unwrap().closed = Some("client left".into());
    }
}

impl ClientEndpoint for RecordingClient {
    fn send(&mut self, packet: BedrockPacket) {
        self.state.lock().unwrap().sent.push(packet);
    }

    fn enable_encryption(&mut self, _cipher: PacketEncryption) {
        self.state.lock().unwrap().encrypted = true;
    }

    fn close(&mut self, reason: &str) {
        self.state.lock().unwrap().closed = Some(reason.to_string());
    }

    fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed.is_some()
    }
}

#[derive(Default)]
struct BackendState {
    sent: Vec<ServerboundPacket>,
    closed: Option<String>,
}

/// Backend endpoint that records what it is sent. Clones share state.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    state: Arc<Mutex<BackendState>>,
}

impl RecordingBackend {
    pub fn take(&self) -> Vec<ServerboundPacket> {
        std::mem::take(&mut self.state.lock().unwrap().sent)
    }

    pub fn close_reason(&self) -> Option<String> {
        self.state.lock().unwrap().closed.clone()
    }

    /// Simulate the backend dropping the connection.
    pub fn close_now(&self) {
        self.state.lock().unwrap().closed = Some("backend left".into());
    }
}

impl BackendEndpoint for RecordingBackend {
    fn send(&mut self, packet: ServerboundPacket) {
        self.state.lock().unwrap().sent.push(packet);
    }

    fn close(&mut self, reason: &str) {
        self.state.lock().unwrap().closed = Some(reason.to_string());
    }

    fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed.is_some()
    }
}

#[derive(Default)]
struct FlowState {
    starts: Vec<(String, bool)>,
    handle: Option<SessionHandle>,
}

/// Device-code flow that only remembers being started.
#[derive(Clone, Default)]
pub struct RecordingFlow {
    state: Arc<Mutex<FlowState>>,
}

impl RecordingFlow {
    pub fn starts(&self) -> Vec<(String, bool)> {
        self.state.lock().unwrap().starts.clone()
    }

    pub fn handle(&self) -> Option<SessionHandle> {
        self.state.lock().unwrap().handle.clone()
    }
}

impl DeviceCodeFlow for RecordingFlow {
    fn start(&self, username: &str, save_token: bool, handle: SessionHandle) {
        let mut state = self.state.lock().unwrap();
        state.starts.push((username.to_string(), save_token));
        state.handle = Some(handle);
    }
}

/// A session wired to recording endpoints.
pub struct TestSession {
    pub session: Session,
    pub inbox: SessionInbox,
    pub client: RecordingClient,
    pub backend: RecordingBackend,
}

fn auth_section(timeout: u64) -> AuthSection {
    AuthSection {
        pending_authentication_timeout: timeout,
        ..AuthSection::default()
    }
}

fn test_root() -> mc_rs_crypto::PublicKey {
    HandshakeKeyPair::generate().public_key()
}

impl TestSession {
    pub fn new() -> Self {
        Self::with_auth_type(AuthType::Offline)
    }

    pub fn with_auth_type(auth_type: AuthType) -> Self {
        Self::build(GatewayContext::new(auth_section(0), test_root()), auth_type)
    }

    pub fn with_timeout(seconds: u64) -> Self {
        Self::build(
            GatewayContext::new(auth_section(seconds), test_root()),
            AuthType::Offline,
        )
    }

    pub fn with_context(ctx: GatewayContext, auth_type: AuthType) -> Self {
        Self::build(ctx, auth_type)
    }

    /// Logged in and past configuration.
    pub fn playing() -> Self {
        let mut test = Self::new();
        test.session.set_phase(SessionPhase::Playing);
        test.session.auth.state = AuthState::Authenticated;
        test.session.player.username = Some("Steve".into());
        test
    }

    /// Online mode with `flow`, encryption done, identity of "Steve".
    pub fn online(flow: RecordingFlow, saved_user_logins: &[&str]) -> Self {
        let auth = AuthSection {
            saved_user_logins: saved_user_logins.iter().map(|s| s.to_string()).collect(),
            ..auth_section(120)
        };
        let ctx = GatewayContext::new(auth, test_root()).with_device_code_flow(Arc::new(flow));
        let mut test = Self::build(ctx, AuthType::Online);
        test.session.set_phase(SessionPhase::Encrypted);
        test.session.auth.state = AuthState::EncryptionEstablished;
        test.session.auth.data = Some(AuthData {
            name: "Steve".into(),
            uuid: Uuid::new(1, 1),
            xuid: offline_xuid("Steve").to_string(),
        });
        test
    }

    fn build(ctx: GatewayContext, auth_type: AuthType) -> Self {
        let client = RecordingClient::default();
        let backend = RecordingBackend::default();
        let address: SocketAddr = ([127, 0, 0, 1], 19132).into();
        let (session, inbox) = Session::new(
            Arc::new(ctx),
            address,
            auth_type,
            "en_US",
            Box::new(client.clone()),
            Box::new(backend.clone()),
        );
        Self {
            session,
            inbox,
            client,
            backend,
        }
    }
}

fn identity(name: &str) -> serde_json::Value {
    json!({
        "displayName": name,
        "identity": "8f6a2c1e-3b4d-4e5f-9a0b-1c2d3e4f5a6b",
    })
}

fn client_data(client: &HandshakeKeyPair) -> String {
    sign_jwt(client, &json!({ "LanguageCode": "en_US", "MaxViewDistance": 12 })).unwrap()
}

/// Two-link chain: the client hands over to `root`, which vouches for the
/// client key.
pub fn signed_login(
    root: &HandshakeKeyPair,
    client: &HandshakeKeyPair,
    name: &str,
    xuid: Option<&str>,
) -> Login {
    let mut extra = identity(name);
    if let Some(xuid) = xuid {
        extra["XUID"] = json!(xuid);
    }
    let handover = sign_jwt(
        client,
        &json!({
            "certificateAuthority": true,
            "identityPublicKey": root.public_key_base64().unwrap(),
        }),
    )
    .unwrap();
    let vouch = sign_jwt(
        root,
        &json!({
            "extraData": extra,
            "identityPublicKey": client.public_key_base64().unwrap(),
        }),
    )
    .unwrap();
    Login {
        protocol_version: PROTOCOL_VERSION,
        chain: vec![handover, vouch],
        client_data_jwt: client_data(client),
    }
}

/// One self-signed link, as sent by clients not signed in to Xbox Live.
pub fn self_signed_login(client: &HandshakeKeyPair, name: &str) -> Login {
    let link = sign_jwt(
        client,
        &json!({
            "extraData": identity(name),
            "identityPublicKey": client.public_key_base64().unwrap(),
        }),
    )
    .unwrap();
    Login {
        protocol_version: PROTOCOL_VERSION,
        chain: vec![link],
        client_data_jwt: client_data(client),
    }
}
