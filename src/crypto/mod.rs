//! Cryptographic primitives for Lockup.
//!
//! This module provides:
//! - The persisted global salt (`salt`)
//! - PBKDF2 master-password hashing and session key derivation (`kdf`)
//! - Zeroize-on-drop key holders (`keys`)
//! - AES-256-GCM field tokens (`cipher`)

pub mod cipher;
pub mod kdf;
pub mod keys;
pub mod salt;

pub use cipher::Cipher;
pub use kdf::{
    derive_session_keys, generate_salt, hash_master_password, verify_master_password,
    PBKDF2_ITERATIONS, SALT_LEN,
};
pub use keys::{CipherKey, HmacKey, SessionKeys};
pub use salt::SaltStore;
