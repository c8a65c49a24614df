//! Password-based key derivation using PBKDF2.
//!
//! Two distinct derivations live here:
//!
//! - The **verification record** for the master password:
//!   `hex(record_salt) || hex(PBKDF2-HMAC-SHA512(password, record_salt, 100000, 64))`
//!   where `record_salt` is fresh for every record (160 hex characters total).
//! - The **session keys** derived from the master password and the global
//!   vault salt: a 32-byte cipher key (PBKDF2-HMAC-SHA512) and a 32-byte
//!   HMAC key (PBKDF2-HMAC-SHA256).
//!
//! The parameters are fixed. Changing any of them locks out every value
//! encrypted under the old derivation.

use pbkdf2::pbkdf2_hmac_array;
use rand::RngCore;
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::keys::{CipherKey, HmacKey, SessionKeys, KEY_LEN};
use crate::errors::{LockupError, Result};

/// PBKDF2 iteration count shared by every derivation.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of both the global salt and the per-record salt (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the master-password verifier (512 bits).
const VERIFIER_LEN: usize = 64;

/// Hex length of a stored verification record: salt + verifier.
pub const PASSWORD_HASH_HEX_LEN: usize = (SALT_LEN + VERIFIER_LEN) * 2;

/// Derive the cipher key and the HMAC key for a session.
///
/// Pure and deterministic: the same password and salt always produce
/// byte-identical keys.
pub fn derive_session_keys(password: &[u8], salt: &[u8; SALT_LEN]) -> SessionKeys {
    let mut cipher_bytes = pbkdf2_hmac_array::<Sha512, KEY_LEN>(password, salt, PBKDF2_ITERATIONS);
    let mut hmac_bytes = pbkdf2_hmac_array::<Sha256, KEY_LEN>(password, salt, PBKDF2_ITERATIONS);

    let keys = SessionKeys::new(CipherKey::new(cipher_bytes), HmacKey::new(hmac_bytes));
    cipher_bytes.zeroize();
    hmac_bytes.zeroize();
    keys
}

/// Hash a master password into a fresh verification record.
pub fn hash_master_password(password: &[u8]) -> String {
    hash_master_password_with_salt(password, &generate_salt())
}

/// Build a verification record from an explicit per-record salt.
pub fn hash_master_password_with_salt(password: &[u8], record_salt: &[u8; SALT_LEN]) -> String {
    let mut verifier =
        pbkdf2_hmac_array::<Sha512, VERIFIER_LEN>(password, record_salt, PBKDF2_ITERATIONS);
    let record = format!("{}{}", hex::encode(record_salt), hex::encode(verifier));
    verifier.zeroize();
    record
}

/// Check `password` against a stored verification record.
///
/// The recomputed verifier is compared to the stored one in constant time.
/// A record that is not 160 hex characters is reported as malformed
/// rather than as a mismatch.
pub fn verify_master_password(password: &[u8], stored_hash: &str) -> Result<bool> {
    if !stored_hash.is_ascii() {
        return Err(LockupError::InvalidPasswordHash(
            "record contains non-ASCII characters".into(),
        ));
    }
    if stored_hash.len() != PASSWORD_HASH_HEX_LEN {
        return Err(LockupError::InvalidPasswordHash(format!(
            "expected {PASSWORD_HASH_HEX_LEN} hex characters, found {}",
            stored_hash.len()
        )));
    }

    let (salt_hex, verifier_hex) = stored_hash.split_at(SALT_LEN * 2);

    let mut record_salt = [0u8; SALT_LEN];
    hex::decode_to_slice(salt_hex, &mut record_salt)
        .map_err(|e| LockupError::InvalidPasswordHash(format!("salt: {e}")))?;

    let mut stored_verifier = [0u8; VERIFIER_LEN];
    hex::decode_to_slice(verifier_hex, &mut stored_verifier)
        .map_err(|e| LockupError::InvalidPasswordHash(format!("verifier: {e}")))?;

    let mut candidate =
        pbkdf2_hmac_array::<Sha512, VERIFIER_LEN>(password, &record_salt, PBKDF2_ITERATIONS);
    let matches: bool = candidate.ct_eq(&stored_verifier).into();
    candidate.zeroize();

    Ok(matches)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
