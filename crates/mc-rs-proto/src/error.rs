//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("JWT decode error: {0}")]
    JwtDecode(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("invalid login data: {0}")]
    InvalidLogin(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}
