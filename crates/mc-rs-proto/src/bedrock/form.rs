//! Form packets (ModalFormRequest / ModalFormResponse).

/// ModalFormRequest (0x64) — Server → Client.
///
/// Sends a form (simple, modal, or custom) to the client as a JSON string.
#[derive(Debug, Clone)]
pub struct ModalFormRequest {
    /// Unique form ID used to correlate the response.
    pub form_id: u32,
    /// JSON-encoded form data.
    pub form_data: String,
}

/// Why the client closed a form without answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCancelReason {
    UserClosed,
    UserBusy,
}

/// ModalFormResponse (0x65) — Client → Server.
#[derive(Debug, Clone)]
pub struct ModalFormResponse {
    pub form_id: u32,
    /// JSON response data; absent when the form was closed.
    pub response_data: Option<String>,
    pub cancel_reason: Option<FormCancelReason>,
}

impl ModalFormResponse {
    /// Button index for simple forms, or 0/1 for modal forms
    /// (`true` → 0, `false` → 1). `None` when closed or malformed.
    pub fn clicked_button(&self) -> Option<u32> {
        let data = self.response_data.as_deref()?.trim();
        match serde_json::from_str::<serde_json::Value>(data).ok()? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_json::Value::Bool(true) => Some(0),
            serde_json::Value::Bool(false) => Some(1),
            _ => None,
        }
    }
}
