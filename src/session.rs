//! An unlocked vault session.
//!
//! A `Session` is built once, right after the master password has been
//! verified, and owns every piece of key material the vault needs. It is
//! passed explicitly to whatever encrypts, decrypts or tags data, and its
//! keys are wiped when it is dropped.

use tracing::debug;

use crate::crypto::kdf::{derive_session_keys, SALT_LEN};
use crate::crypto::{Cipher, HmacKey, SaltStore, SessionKeys};
use crate::errors::{LockupError, Result};
use crate::vault::db::Database;
use crate::vault::master::Authenticator;

pub struct Session {
    keys: SessionKeys,
    cipher: Cipher,
    salt: [u8; SALT_LEN],
}

impl Session {
    /// Derive a session from a password and the global salt.
    ///
    /// Does not check the password; use `unlock` for that.
    pub fn derive(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<Self> {
        let keys = derive_session_keys(password, salt);
        let cipher = Cipher::new(keys.cipher_key())?;
        Ok(Self {
            keys,
            cipher,
            salt: *salt,
        })
    }

    /// Verify `password` against the stored record, then derive the keys.
    ///
    /// The global salt is created here on first use.
    pub fn unlock(db: &Database, salt_store: &SaltStore, password: &[u8]) -> Result<Self> {
        let auth = Authenticator::new(db);
        if !auth.exists()? {
            return Err(LockupError::MasterPasswordNotSet);
        }
        if !auth.verify(password)? {
            return Err(LockupError::WrongMasterPassword);
        }

        let salt = salt_store.load_or_create()?;
        let session = Self::derive(password, &salt)?;
        debug!("session unlocked");
        Ok(session)
    }

    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    pub fn hmac_key(&self) -> &HmacKey {
        self.keys.hmac_key()
    }

    /// The global salt these keys were derived from.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }
}
