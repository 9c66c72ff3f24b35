//! Hooks for the external Java account sign-in.
//!
//! The exchange itself (HTTP polling, token storage) lives outside the
//! gateway behind [`DeviceCodeFlow`]. It reports back through
//! [`deliver`], which hops onto the session's task before touching any
//! session state.

use mc_rs_proto::java::GameProfile;
use tracing::{info, warn};

use super::{complete_authentication, forms, AuthState};
use crate::session::{Session, SessionHandle};

/// What the player must enter on the sign-in website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCode {
    pub user_code: String,
    pub verification_uri: String,
    /// Seconds until the code stops working.
    pub expires_in: u64,
}

/// Progress reported by a [`DeviceCodeFlow`].
#[derive(Debug, Clone)]
pub enum DeviceCodeEvent {
    /// A code is ready to show.
    Code(DeviceCode),
    Completed(GameProfile),
    Failed(String),
    /// A saved token was refused; the player must sign in again.
    TokenExpired,
}

/// Runs a device-code exchange for one player.
pub trait DeviceCodeFlow: Send + Sync {
    /// Begin signing in `username`. Progress goes to [`deliver`] with
    /// `handle`, from any thread.
    fn start(&self, username: &str, save_token: bool, handle: SessionHandle);
}

/// Hand `event` to the session it belongs to. Returns false when the
/// session is gone.
pub fn deliver(handle: &SessionHandle, event: DeviceCodeEvent) -> bool {
    handle.execute(move |session| handle_event(session, event))
}

pub(crate) fn start(session: &mut Session, save_token: bool) {
    let Some(flow) = session.context().device_code.clone() else {
        let reason = session.translate("gateway.auth.login.unavailable", &[]);
        session.disconnect(&reason);
        return;
    };
    let Some(name) = session.auth.data.as_ref().map(|d| d.name.clone()) else {
        session.disconnect("disconnectionScreen.internalError.cantConnect");
        return;
    };

    session.auth.state = AuthState::AwaitingExternalAuth;
    info!("Starting Java sign-in for {name} (save token: {save_token})");
    flow.start(&name, save_token, session.handle().clone());
}

fn handle_event(session: &mut Session, event: DeviceCodeEvent) {
    if session.is_closed() || session.auth_state().is_authenticated() {
        return;
    }
    match event {
        DeviceCodeEvent::Code(code) => forms::show_device_code(session, &code),
        DeviceCodeEvent::Completed(profile) => complete_authentication(session, profile),
        DeviceCodeEvent::Failed(message) => {
            warn!("Java sign-in for {} failed: {message}", session.display_name());
            let reason = session.translate("gateway.auth.login.failed", &[&message]);
            session.disconnect(&reason);
        }
        DeviceCodeEvent::TokenExpired => forms::show_token_expired(session),
    }
}
