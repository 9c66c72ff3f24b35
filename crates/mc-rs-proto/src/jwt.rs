//! JWT structure for the Bedrock login payload (no signature verification).
//!
//! Signature checks live in `mc-rs-crypto`; this module only splits tokens
//! and maps their JSON into typed claims.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Deserialize;

use crate::error::ProtoError;

/// JWT header fields we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub x5u: Option<String>,
}

/// The three base64url sections of a compact JWT.
#[derive(Debug, Clone, Copy)]
pub struct JwtParts<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl<'a> JwtParts<'a> {
    /// The bytes covered by the signature: `header.payload`.
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }

    pub fn decode_header(&self) -> Result<JwtHeader, ProtoError> {
        let bytes = decode_base64url(self.header)
            .map_err(|e| ProtoError::JwtDecode(format!("header base64: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| ProtoError::JsonParse(format!("JWT header: {e}")))
    }

    pub fn decode_payload(&self) -> Result<serde_json::Value, ProtoError> {
        let bytes = decode_base64url(self.payload)
            .map_err(|e| ProtoError::JwtDecode(format!("payload base64: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ProtoError::JsonParse(format!("JWT payload: {e}")))
    }

    pub fn decode_signature(&self) -> Result<Vec<u8>, ProtoError> {
        decode_base64url(self.signature)
            .map_err(|e| ProtoError::JwtDecode(format!("signature base64: {e}")))
    }
}

/// Split a compact JWT into its three sections.
pub fn split_jwt(token: &str) -> Result<JwtParts<'_>, ProtoError> {
    let mut parts = token.splitn(3, '.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature)) => Ok(JwtParts {
            header,
            payload,
            signature,
        }),
        _ => Err(ProtoError::JwtDecode(format!(
            "expected 3 parts, got {}",
            token.split('.').count()
        ))),
    }
}

/// Decode a JWT without verifying the signature.
pub fn decode_jwt_unverified(token: &str) -> Result<(JwtHeader, serde_json::Value), ProtoError> {
    let parts = split_jwt(token)?;
    Ok((parts.decode_header()?, parts.decode_payload()?))
}

/// Identity data from the last JWT in the chain (`extraData` field).
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityData {
    #[serde(rename = "XUID", default)]
    pub xuid: Option<String>,
    pub identity: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// Claims carried by each JWT of the certificate chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    #[serde(default)]
    pub extra_data: Option<IdentityData>,
    pub identity_public_key: Option<String>,
    #[serde(default)]
    pub certificate_authority: bool,
}

/// Parse the chain JSON: `{"chain": ["jwt1", "jwt2", "jwt3"]}`
pub fn parse_chain_json(data: &str) -> Result<Vec<String>, ProtoError> {
    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|e| ProtoError::JsonParse(e.to_string()))?;

    let chain_array = value
        .get("chain")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ProtoError::InvalidLogin("missing 'chain' array in login data".into()))?;

    chain_array
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or_else(|| ProtoError::InvalidLogin("chain item is not a string".into()))
        })
        .collect()
}

/// Client data carried in the second login JWT (device, skin, locale).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClientData {
    pub game_version: String,
    pub server_address: String,
    pub third_party_name: String,
    pub language_code: String,
    pub skin_id: String,
    pub device_id: String,
    pub device_model: String,
    #[serde(rename = "DeviceOS")]
    pub device_os: i32,
    pub current_input_mode: i32,
    pub default_input_mode: i32,
    #[serde(rename = "UIProfile")]
    pub ui_profile: i32,
    pub max_view_distance: i32,
    /// The raw JWT this was parsed from; dropped once the backend login ends.
    #[serde(skip)]
    pub original_string: Option<String>,
}

/// Decode base64url (try without padding first, then with padding).
fn decode_base64url(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input).or_else(|_| URL_SAFE.decode(input))
}
