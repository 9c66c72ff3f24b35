//! AES-256-CFB8 transport cipher for the client link.
//!
//! Each direction keeps its own stream state and frame counter. A frame on
//! the wire is `encrypt(payload || checksum)` where
//! `checksum = SHA256(counter_le || payload || key)[..8]`.

use aes::Aes256;
use bytes::{BufMut, Bytes, BytesMut};
use cfb8::cipher::generic_array::GenericArray;
use cfb8::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use cfb8::{Decryptor, Encryptor};
use sha2::{Digest, Sha256};

use crate::key_derive::EncryptionKey;
use crate::CryptoError;

const CHECKSUM_LEN: usize = 8;

/// Outbound half: seals frames sent to the client.
pub struct Sealer {
    stream: Encryptor<Aes256>,
    key: [u8; 32],
    counter: u64,
}

/// Inbound half: opens frames received from the client.
pub struct Opener {
    stream: Decryptor<Aes256>,
    key: [u8; 32],
    counter: u64,
}

impl Sealer {
    fn new(material: &EncryptionKey) -> Self {
        Self {
            stream: Encryptor::<Aes256>::new((&material.key).into(), (&material.iv).into()),
            key: material.key,
            counter: 0,
        }
    }

    pub fn seal(&mut self, payload: &[u8]) -> Bytes {
        let checksum = frame_checksum(self.counter, payload, &self.key);
        self.counter += 1;

        let mut frame = BytesMut::with_capacity(payload.len() + CHECKSUM_LEN);
        frame.put_slice(payload);
        frame.put_slice(&checksum);

        // CFB8 works one byte per block; the stream state carries over frames.
        for byte in frame.iter_mut() {
            let mut block = GenericArray::from([*byte]);
            self.stream.encrypt_block_mut(&mut block);
            *byte = block[0];
        }
        frame.freeze()
    }
}

impl Opener {
    fn new(material: &EncryptionKey) -> Self {
        Self {
            stream: Decryptor::<Aes256>::new((&material.key).into(), (&material.iv).into()),
            key: material.key,
            counter: 0,
        }
    }

    pub fn open(&mut self, frame: &[u8]) -> Result<Bytes, CryptoError> {
        if frame.len() < CHECKSUM_LEN {
            return Err(CryptoError::ChecksumMismatch);
        }

        let mut plain = BytesMut::from(frame);
        for byte in plain.iter_mut() {
            let mut block = GenericArray::from([*byte]);
            self.stream.decrypt_block_mut(&mut block);
            *byte = block[0];
        }

        let checksum = plain.split_off(plain.len() - CHECKSUM_LEN);
        let expected = frame_checksum(self.counter, &plain, &self.key);
        self.counter += 1;

        if checksum[..] != expected {
            return Err(CryptoError::ChecksumMismatch);
        }
        Ok(plain.freeze())
    }
}

/// Both directions of an established session.
pub struct PacketEncryption {
    outbound: Sealer,
    inbound: Opener,
}

impl PacketEncryption {
    pub fn new(material: &EncryptionKey) -> Self {
        Self {
            outbound: Sealer::new(material),
            inbound: Opener::new(material),
        }
    }

    pub fn encrypt(&mut self, payload: &[u8]) -> Bytes {
        self.outbound.seal(payload)
    }

    pub fn decrypt(&mut self, frame: &[u8]) -> Result<Bytes, CryptoError> {
        self.inbound.open(frame)
    }

    /// Split into independent halves for separate reader and writer tasks.
    pub fn split(self) -> (Sealer, Opener) {
        (self.outbound, self.inbound)
    }
}

fn frame_checksum(counter: u64, payload: &[u8], key: &[u8; 32]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::new()
        .chain_update(counter.to_le_bytes())
        .chain_update(payload)
        .chain_update(key)
        .finalize();
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}
