//! ES384 JWT signing and verification.

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use p384::ecdsa::signature::{Signer, Verifier};
use p384::ecdsa::{Signature, VerifyingKey};
use p384::PublicKey;

use crate::ecdh::HandshakeKeyPair;
use crate::CryptoError;

/// Sign `claims` as a compact JWT.
///
/// ```text
/// Header:  {"alg":"ES384","x5u":"<base64 public key DER>"}
/// ```
pub fn sign_jwt(keypair: &HandshakeKeyPair, claims: &serde_json::Value) -> Result<String, CryptoError> {
    let header = serde_json::json!({
        "alg": "ES384",
        "x5u": keypair.public_key_base64()?,
    });

    let header_b64 = URL_SAFE_NO_PAD
        .encode(serde_json::to_vec(&header).map_err(|e| CryptoError::JwtSign(e.to_string()))?);
    let payload_b64 = URL_SAFE_NO_PAD
        .encode(serde_json::to_vec(claims).map_err(|e| CryptoError::JwtSign(e.to_string()))?);

    let message = format!("{header_b64}.{payload_b64}");
    let signature: Signature = keypair
        .signing_key()
        .try_sign(message.as_bytes())
        .map_err(|e| CryptoError::JwtSign(e.to_string()))?;

    Ok(format!(
        "{message}.{}",
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    ))
}

/// The ServerToClientHandshake JWT: server public key plus the salt token.
///
/// ```text
/// Payload: {"salt":"<base64 16-byte token>","signedToken":"<base64 server pubkey DER>"}
/// ```
pub fn create_handshake_jwt(
    keypair: &HandshakeKeyPair,
    token: &[u8; 16],
) -> Result<String, CryptoError> {
    let claims = serde_json::json!({
        "salt": STANDARD.encode(token),
        "signedToken": keypair.public_key_base64()?,
    });
    sign_jwt(keypair, &claims)
}

/// Check a compact JWT's ES384 signature against `key`.
///
/// Only the signature is checked; claims are left to the caller.
pub fn verify_jwt(token: &str, key: &PublicKey) -> Result<(), CryptoError> {
    let (message, signature_b64) = token
        .rsplit_once('.')
        .ok_or_else(|| CryptoError::JwtMalformed("missing signature section".into()))?;
    if !message.contains('.') {
        return Err(CryptoError::JwtMalformed("missing payload section".into()));
    }

    let signature_bytes = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .or_else(|_| URL_SAFE.decode(signature_b64))
        .map_err(|e| CryptoError::Base64(e.to_string()))?;
    let signature =
        Signature::from_slice(&signature_bytes).map_err(|_| CryptoError::BadSignature)?;

    VerifyingKey::from(key)
        .verify(message.as_bytes(), &signature)
        .map_err(|_| CryptoError::BadSignature)
}
