//! Cryptography for the client login: P-384 key agreement, ES384 JWT
//! signing and verification, key derivation, AES-256-CFB8 transport cipher.

pub mod cipher;
pub mod ecdh;
pub mod jwt;
pub mod key_derive;

pub use cipher::PacketEncryption;
pub use ecdh::{parse_public_key, HandshakeKeyPair};
pub use jwt::{create_handshake_jwt, sign_jwt, verify_jwt};
pub use key_derive::{derive_key, EncryptionKey};

pub use p384::PublicKey;

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("packet checksum mismatch")]
    ChecksumMismatch,

    #[error("JWT signing error: {0}")]
    JwtSign(String),

    #[error("malformed JWT: {0}")]
    JwtMalformed(String),

    #[error("JWT signature does not verify")]
    BadSignature,

    #[error("base64 decode error: {0}")]
    Base64(String),
}
