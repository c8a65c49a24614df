//! Key material held for the duration of an unlocked session.
//!
//! Every type here wipes its bytes when dropped so derived keys do not
//! linger in memory after the session ends. None of them is ever written
//! to disk.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of both derived keys (256 bits).
pub const KEY_LEN: usize = 32;

/// Symmetric key for the cipher engine.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct CipherKey {
    bytes: [u8; KEY_LEN],
}

impl CipherKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Key used only to tag transcript lines, never for confidentiality.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct HmacKey {
    bytes: [u8; KEY_LEN],
}

impl HmacKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Both keys derived from one master password and the global salt.
pub struct SessionKeys {
    cipher_key: CipherKey,
    hmac_key: HmacKey,
}

impl SessionKeys {
    pub fn new(cipher_key: CipherKey, hmac_key: HmacKey) -> Self {
        Self {
            cipher_key,
            hmac_key,
        }
    }

    pub fn cipher_key(&self) -> &CipherKey {
        &self.cipher_key
    }

    pub fn hmac_key(&self) -> &HmacKey {
        &self.hmac_key
    }
}
