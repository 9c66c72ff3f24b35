//! AES-256 key derivation from the ECDH shared secret.

use sha2::{Digest, Sha256};

/// Symmetric key material for one session's transport cipher.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey {
    pub key: [u8; 32],
    pub iv: [u8; 16],
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(..)")
    }
}

/// ```text
/// key = SHA256(token + shared_secret)
/// iv  = key[0..16]
/// ```
pub fn derive_key(token: &[u8; 16], shared_secret: &[u8]) -> EncryptionKey {
    let mut hasher = Sha256::new();
    hasher.update(token);
    hasher.update(shared_secret);

    let mut key = [0u8; 32];
    key.copy_from_slice(&hasher.finalize());
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&key[..16]);

    EncryptionKey { key, iv }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(derive_key(&[0x42; 16], &[0xAB; 48]), derive_key(&[0x42; 16], &[0xAB; 48]));
    }

    #[test]
    fn iv_is_key_prefix() {
        let derived = derive_key(&[0x01; 16], &[0x02; 48]);
        assert_eq!(&derived.key[..16], &derived.iv);
    }

    #[test]
    fn debug_hides_material() {
        let derived = derive_key(&[0x01; 16], &[0x02; 48]);
        assert_eq!(format!("{derived:?}"), "EncryptionKey(..)");
    }
}
