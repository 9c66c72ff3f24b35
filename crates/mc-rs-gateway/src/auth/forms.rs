//! Sign-in forms shown during online-mode authentication.

use std::collections::HashMap;

use mc_rs_proto::bedrock::{GameRulesChanged, ModalFormRequest, ModalFormResponse};
use serde_json::{json, Value};
use tracing::debug;

use super::device_code::{self, DeviceCode};
use super::AuthState;
use crate::locale::translate_lines;
use crate::session::Session;

/// Which sign-in form a form ID belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingForm {
    Notice,
    SaveTokenConsent,
    TokenExpired,
    DeviceCode,
}

/// Forms on the client's screen, by form ID.
#[derive(Debug, Default)]
pub struct FormTracker {
    next_id: u32,
    pending: HashMap<u32, PendingForm>,
}

impl FormTracker {
    pub fn open(&mut self, form: PendingForm) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.insert(self.next_id, form);
        self.next_id
    }

    pub fn take(&mut self, form_id: u32) -> Option<PendingForm> {
        self.pending.remove(&form_id)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

fn send_form(session: &mut Session, form: PendingForm, data: Value) {
    let form_id = session.auth.forms.open(form);
    session.send_upstream(ModalFormRequest {
        form_id,
        form_data: data.to_string(),
    });
}

fn simple_form(title: String, content: String, buttons: [String; 2]) -> Value {
    json!({
        "type": "form",
        "title": title,
        "content": content,
        "buttons": buttons.iter().map(|text| json!({ "text": text })).collect::<Vec<_>>(),
    })
}

fn lines(session: &Session, text: &str) -> String {
    translate_lines(session.context().locale.as_ref(), text, session.locale())
}

/// First screen of online sign-in: log in with Microsoft or leave.
pub fn show_notice(session: &mut Session) {
    // Keeps the sky still behind the form.
    session.send_upstream(GameRulesChanged::daylight_cycle(false));

    let form = simple_form(
        session.translate("gateway.auth.login.form.notice.title", &[]),
        lines(session, "gateway.auth.login.form.notice.desc"),
        [
            session.translate("gateway.auth.login.form.notice.btn_login.microsoft", &[]),
            session.translate("gateway.auth.login.form.notice.btn_disconnect", &[]),
        ],
    );
    send_form(session, PendingForm::Notice, form);
    session.auth.state = AuthState::AwaitingUserConsent;
}

/// Ask before remembering the sign-in for this player.
pub fn show_save_token_consent(session: &mut Session) {
    let form = simple_form(
        "%gui.signIn".into(),
        lines(
            session,
            "gateway.auth.login.save_token.warning\n\ngateway.auth.login.save_token.proceed",
        ),
        ["%gui.ok".into(), "%gui.decline".into()],
    );
    send_form(session, PendingForm::SaveTokenConsent, form);
    session.auth.state = AuthState::AwaitingUserConsent;
}

/// The saved sign-in no longer works; offer a fresh one.
pub fn show_token_expired(session: &mut Session) {
    let form = simple_form(
        session.translate("gateway.auth.login.form.expired", &[]),
        lines(
            session,
            "gateway.auth.login.save_token.expired\n\ngateway.auth.login.save_token.proceed",
        ),
        ["%gui.ok".into(), "%menu.disconnect".into()],
    );
    send_form(session, PendingForm::TokenExpired, form);
    session.auth.state = AuthState::AwaitingUserConsent;
}

/// Show the code the player enters on the sign-in website.
pub fn show_device_code(session: &mut Session, code: &DeviceCode) {
    let mut content = format!(
        "%xbox.signin.website\n{}\n%xbox.signin.enterCode\n{}",
        code.verification_uri, code.user_code,
    );
    let timeout = session.context().auth.pending_authentication_timeout;
    if timeout != 0 {
        content.push_str("\n\n");
        content.push_str(&session.translate("gateway.auth.login.timeout", &[&timeout.to_string()]));
    }
    let form = json!({
        "type": "modal",
        "title": "%xbox.signin",
        "content": content,
        "button1": "%gui.done",
        "button2": "%menu.disconnect",
    });
    send_form(session, PendingForm::DeviceCode, form);
}

/// Route a form answer. Closed, invalid and unknown answers show the form
/// that asked the question again; the device-code modal falls back to the
/// notice.
pub fn handle_response(session: &mut Session, response: &ModalFormResponse) {
    let Some(form) = session.auth.forms.take(response.form_id) else {
        debug!(
            "Response for unknown form {} from {}",
            response.form_id,
            session.display_name()
        );
        return;
    };

    let button = response.clicked_button();
    debug!("{form:?} answered with {button:?} by {}", session.display_name());
    match (form, button) {
        (PendingForm::Notice, Some(0)) => {
            let name = session.auth.data.as_ref().map(|d| d.name.clone());
            let saves_token = name
                .is_some_and(|name| session.context().auth.saved_user_logins.contains(&name));
            if saves_token {
                show_save_token_consent(session);
            } else {
                device_code::start(session, false);
            }
        }
        (PendingForm::Notice, Some(1)) | (PendingForm::DeviceCode, Some(1)) => {
            let reason = session.translate("gateway.auth.login.form.disconnect", &[]);
            session.disconnect(&reason);
        }
        // "Done" on the code screen; the sign-in itself reports completion.
        (PendingForm::DeviceCode, Some(0)) => {}
        (PendingForm::Notice, _) | (PendingForm::DeviceCode, _) => show_notice(session),
        (PendingForm::SaveTokenConsent, Some(0)) | (PendingForm::TokenExpired, Some(0)) => {
            device_code::start(session, true);
        }
        (PendingForm::SaveTokenConsent, Some(1)) | (PendingForm::TokenExpired, Some(1)) => {
            session.disconnect("%disconnect.quitting");
        }
        (PendingForm::SaveTokenConsent, _) => show_save_token_consent(session),
        (PendingForm::TokenExpired, _) => show_token_expired(session),
    }
}
