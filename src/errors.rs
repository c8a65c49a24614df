use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockup.
#[derive(Debug, Error)]
pub enum LockupError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong master password or corrupted data")]
    DecryptionFailed,

    #[error("HMAC error: {0}")]
    HmacError(String),

    #[error("Salt file is corrupted: expected 16 bytes, found {0}")]
    InvalidSalt(usize),

    // --- Master password errors ---
    #[error("Stored master password record is malformed: {0}")]
    InvalidPasswordHash(String),

    #[error("No master password is set (run `lockup init` first)")]
    MasterPasswordNotSet,

    #[error("A master password is already set for this vault")]
    MasterPasswordAlreadySet,

    #[error("Wrong master password")]
    WrongMasterPassword,

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Record {0} not found")]
    RecordNotFound(i64),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    // --- Transcript errors ---
    #[error("Integrity check failed on line {line}: transcript was tampered with or made under another key")]
    IntegrityFailed { line: usize },

    #[error("Malformed transcript line {line}: {reason}")]
    TranscriptParse { line: usize, reason: String },

    #[error("Transcript line {line} holds {fields} fields, expected 4")]
    TranscriptFormat { line: usize, fields: usize },

    // --- Storage errors ---
    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Lockup results.
pub type Result<T> = std::result::Result<T, LockupError>;
