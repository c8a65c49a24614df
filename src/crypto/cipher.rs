//! Authenticated field encryption (AES-256-GCM tokens).
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and stamps
//! the token with its issue time, so encrypting the same plaintext twice
//! never yields the same token.
//!
//! Layout of a token before base64url encoding:
//!   [ 0x80 | issued_at: u64 BE | 12-byte nonce | ciphertext + 16-byte tag ]
//!
//! The 9-byte `version | issued_at` prefix is bound as associated data, so
//! tampering with any byte of the token fails the tag check.

use std::time::{SystemTime, UNIX_EPOCH};

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use zeroize::Zeroize;

use super::keys::CipherKey;
use crate::errors::{LockupError, Result};

/// Leading byte of every token.
const TOKEN_VERSION: u8 = 0x80;

/// Size of `version | issued_at`.
const HEADER_LEN: usize = 9;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag.
const TAG_LEN: usize = 16;

/// Encrypts and decrypts individual fields under the session cipher key.
pub struct Cipher {
    aead: Aes256Gcm,
}

impl Cipher {
    pub fn new(key: &CipherKey) -> Result<Self> {
        let aead = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| LockupError::EncryptionFailed(format!("invalid key length: {e}")))?;
        Ok(Self { aead })
    }

    /// Encrypt `plaintext` into a base64url token.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let issued_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let mut header = [0u8; HEADER_LEN];
        header[0] = TOKEN_VERSION;
        header[1..].copy_from_slice(&issued_at.to_be_bytes());

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let sealed = self
            .aead
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: &header,
                },
            )
            .map_err(|e| LockupError::EncryptionFailed(format!("encryption error: {e}")))?;

        let mut token = Vec::with_capacity(HEADER_LEN + NONCE_LEN + sealed.len());
        token.extend_from_slice(&header);
        token.extend_from_slice(&nonce);
        token.extend_from_slice(&sealed);
        Ok(URL_SAFE.encode(token))
    }

    /// Decrypt a token produced by `encrypt` under the same key.
    ///
    /// Malformed input, a foreign key, and a failed tag check all surface
    /// as `DecryptionFailed`.
    pub fn decrypt(&self, token: &str) -> Result<String> {
        let raw = URL_SAFE
            .decode(token.trim().as_bytes())
            .map_err(|_| LockupError::DecryptionFailed)?;

        if raw.len() < HEADER_LEN + NONCE_LEN + TAG_LEN || raw[0] != TOKEN_VERSION {
            return Err(LockupError::DecryptionFailed);
        }

        let (header, rest) = raw.split_at(HEADER_LEN);
        let (nonce_bytes, sealed) = rest.split_at(NONCE_LEN);

        let plaintext = self
            .aead
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: sealed,
                    aad: header,
                },
            )
            .map_err(|_| LockupError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            LockupError::DecryptionFailed
        })
    }
}
