//! One client connection and everything the gateway knows about it.

pub mod endpoint;
pub mod handle;
pub mod manager;

pub use endpoint::{BackendEndpoint, ClientEndpoint};
pub use handle::{spawn_session, SessionHandle, SessionInbox, SessionTask};
pub use manager::SessionManager;

use std::net::SocketAddr;
use std::sync::Arc;

use mc_rs_proto::bedrock::{BedrockPacket, Disconnect};
use mc_rs_proto::java::ServerboundPacket;
use mc_rs_proto::types::Uuid;
use tracing::{info, warn};

use crate::auth::{AuthSession, AuthState};
use crate::config::AuthType;
use crate::context::GatewayContext;
use crate::entity::cache::PLAYER_RUNTIME_ID;
use crate::entity::{EntityCache, EntityContext};

/// Connection phase. Gameplay translators run only in `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    /// Handshake JWT sent, waiting for the client to confirm.
    Handshake,
    Encrypted,
    /// Backend accepted the profile; configuration in progress.
    Configuring,
    Playing,
}

/// The session's own player as seen by the backend.
#[derive(Debug, Clone)]
pub struct PlayerInfo {
    pub username: Option<String>,
    pub uuid: Option<Uuid>,
    /// Java entity ID, known once play begins.
    pub entity_id: Option<i32>,
    pub runtime_id: u64,
}

pub struct Session {
    handle: SessionHandle,
    ctx: Arc<GatewayContext>,
    remote_address: SocketAddr,
    auth_type: AuthType,
    locale: String,
    phase: SessionPhase,
    pub(crate) upstream: Box<dyn ClientEndpoint>,
    pub(crate) downstream: Box<dyn BackendEndpoint>,
    pub(crate) entities: EntityCache,
    pub(crate) auth: AuthSession,
    /// Runtime ID of the entity under the client's crosshair.
    pub(crate) mouseover: Option<u64>,
    pub(crate) player: PlayerInfo,
}

impl Session {
    pub fn new(
        ctx: Arc<GatewayContext>,
        remote_address: SocketAddr,
        auth_type: AuthType,
        locale: impl Into<String>,
        upstream: Box<dyn ClientEndpoint>,
        downstream: Box<dyn BackendEndpoint>,
    ) -> (Self, SessionInbox) {
        let (handle, inbox) = handle::channel();
        let session = Self {
            handle,
            ctx,
            remote_address,
            auth_type,
            locale: locale.into(),
            phase: SessionPhase::Unauthenticated,
            upstream,
            downstream,
            entities: EntityCache::new(),
            auth: AuthSession::default(),
            mouseover: None,
            player: PlayerInfo {
                username: None,
                uuid: None,
                entity_id: None,
                runtime_id: PLAYER_RUNTIME_ID,
            },
        };
        (session, inbox)
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    pub fn context(&self) -> &Arc<GatewayContext> {
        &self.ctx
    }

    pub fn remote_address(&self) -> SocketAddr {
        self.remote_address
    }

    pub fn auth_type(&self) -> AuthType {
        self.auth_type
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.state
    }

    pub fn player(&self) -> &PlayerInfo {
        &self.player
    }

    /// Either side has gone away.
    pub fn is_closed(&self) -> bool {
        self.upstream.is_closed() || self.downstream.is_closed()
    }

    /// Name for log lines: the Java name once known, else the Bedrock one.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.player.username {
            return name.clone();
        }
        match &self.auth.data {
            Some(data) => data.name.clone(),
            None => self.remote_address.to_string(),
        }
    }

    /// Translate a gateway key into this session's language.
    pub fn translate(&self, key: &str, args: &[&str]) -> String {
        self.ctx.locale.translate(key, &self.locale, args)
    }

    pub fn send_upstream(&mut self, packet: impl Into<BedrockPacket>) {
        self.upstream.send(packet.into());
    }

    pub fn send_downstream(&mut self, packet: impl Into<ServerboundPacket>) {
        self.downstream.send(packet.into());
    }

    /// Split borrows: the entity table plus what entities need to emit
    /// packets.
    pub(crate) fn entity_parts(&mut self) -> (&mut EntityCache, EntityContext<'_>) {
        let ctx = EntityContext {
            upstream: self.upstream.as_mut(),
            items: self.ctx.items.as_ref(),
            stored: &self.ctx.stored,
            mouseover: self.mouseover,
        };
        (&mut self.entities, ctx)
    }

    /// Add this session to the index under the player's backend UUID.
    pub(crate) fn register(&mut self, uuid: Uuid) {
        self.player.uuid = Some(uuid);
        if let Some(previous) = self.ctx.sessions.add(uuid, self.handle.clone()) {
            if previous.id() != self.handle.id() {
                warn!("{uuid} connected twice; closing session {}", previous.id());
                previous.execute(|s| s.disconnect("disconnectionScreen.loggedinOtherLocation"));
            }
        }
    }

    /// End the session: tell the client why, close both sides and drop
    /// all per-session state.
    pub fn disconnect(&mut self, reason: &str) {
        if self.auth.state == AuthState::Disconnected {
            return;
        }
        info!("Disconnecting {}: {reason}", self.display_name());

        if !self.upstream.is_closed() {
            self.upstream
                .send_immediately(Disconnect::with_message(reason).into());
            self.upstream.close(reason);
        }
        if !self.downstream.is_closed() {
            self.downstream.close(reason);
        }

        self.entities.clear();
        self.auth.clear();
        self.mouseover = None;
        if let Some(uuid) = self.player.uuid {
            self.ctx.sessions.remove(&uuid, self.handle.id());
        }
    }

    /// Fired by the pending-authentication timer.
    pub fn expire_pending_authentication(&mut self) {
        if self.is_closed() || self.auth.state.is_authenticated() {
            return;
        }
        let reason = self.translate("gateway.auth.login.timed_out", &[]);
        self.disconnect(&reason);
    }
}
