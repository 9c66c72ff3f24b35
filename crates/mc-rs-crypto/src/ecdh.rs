//! Ephemeral P-384 key pair for the client encryption handshake.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use p384::ecdsa::SigningKey;
use p384::pkcs8::{DecodePublicKey, EncodePublicKey};
use p384::{PublicKey, SecretKey};
use rand::rngs::OsRng;

use crate::key_derive::{derive_key, EncryptionKey};
use crate::CryptoError;

/// Server side of one handshake. Generated per session, never reused.
pub struct HandshakeKeyPair {
    secret: SecretKey,
}

impl HandshakeKeyPair {
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::random(&mut OsRng),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    /// Raw 48-byte ECDH shared secret with the peer's public key.
    pub fn shared_secret(&self, peer: &PublicKey) -> [u8; 48] {
        let shared = p384::ecdh::diffie_hellman(self.secret.to_nonzero_scalar(), peer.as_affine());
        let mut result = [0u8; 48];
        result.copy_from_slice(shared.raw_secret_bytes().as_slice());
        result
    }

    /// Transport key for this session: ECDH with the client key, salted with
    /// the token sent in the handshake JWT.
    pub fn encryption_key(&self, client: &PublicKey, token: &[u8; 16]) -> EncryptionKey {
        derive_key(token, &self.shared_secret(client))
    }

    /// ES384 signing key over the same secret.
    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from(self.secret.clone())
    }

    /// Public key as base64-encoded SPKI DER (the `x5u` header form).
    pub fn public_key_base64(&self) -> Result<String, CryptoError> {
        let der = self
            .public_key()
            .to_public_key_der()
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(STANDARD.encode(der.as_bytes()))
    }
}

/// Parse a public key from base64 SPKI DER, as found in `x5u` headers and
/// the `identityPublicKey` claim.
pub fn parse_public_key(base64_der: &str) -> Result<PublicKey, CryptoError> {
    let der_bytes = STANDARD
        .decode(base64_der)
        .map_err(|e| CryptoError::Base64(e.to_string()))?;
    PublicKey::from_public_key_der(&der_bytes)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_sides_derive_same_key() {
        let server = HandshakeKeyPair::generate();
        let client = HandshakeKeyPair::generate();
        let token = [7u8; 16];

        let server_key = server.encryption_key(&client.public_key(), &token);
        let client_key = client.encryption_key(&server.public_key(), &token);
        assert_eq!(server_key, client_key);
    }

    #[test]
    fn token_changes_key() {
        let server = HandshakeKeyPair::generate();
        let client = HandshakeKeyPair::generate();
        let a = server.encryption_key(&client.public_key(), &[0u8; 16]);
        let b = server.encryption_key(&client.public_key(), &[1u8; 16]);
        assert_ne!(a, b);
    }

    #[test]
    fn public_key_base64_roundtrip() {
        let kp = HandshakeKeyPair::generate();
        let parsed = parse_public_key(&kp.public_key_base64().unwrap()).unwrap();
        assert_eq!(parsed, kp.public_key());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_public_key("not-valid-base64!!!").is_err());
        assert!(parse_public_key(&STANDARD.encode(b"not a DER key")).is_err());
    }
}
