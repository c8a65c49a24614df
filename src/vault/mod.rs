//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - The SQLite row store (`db`)
//! - The master-password authenticator (`master`)
//! - `CredentialRecord` (`record`)
//! - High-level `VaultStore` for managing credentials (`store`)
//! - The authenticated export/import transcript (`transcript`)

pub mod db;
pub mod master;
pub mod record;
pub mod store;
pub mod transcript;

// Re-export the most commonly used items.
pub use db::Database;
pub use master::Authenticator;
pub use record::CredentialRecord;
pub use store::VaultStore;
pub use transcript::{export_to_file, import_from_file};
