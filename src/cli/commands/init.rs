//! `lockup init`: create the vault and set the master password.

use std::fs;

use crate::cli::output;
use crate::cli::{prompt_new_password, vault_paths, Cli};
use crate::errors::{LockupError, Result};
use crate::vault::{Authenticator, Database, VaultStore};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let paths = vault_paths(cli)?;

    // 1. Create the data directory if it doesn't exist.
    if !paths.data_dir.exists() {
        fs::create_dir_all(&paths.data_dir)?;
        output::info(&format!(
            "Created vault directory: {}",
            paths.data_dir.display()
        ));
    }

    // 2. Refuse to touch an initialized vault.
    let db = Database::open(&paths.database)?;
    if Authenticator::new(&db).exists()? {
        output::tip("Use `lockup reset-password` to change the master password.");
        return Err(LockupError::VaultAlreadyExists(paths.database));
    }

    // 3. Prompt for the master password (with confirmation).
    let password = prompt_new_password("Choose a master password")?;

    // 4. Store the verification record and derive the session (creates the salt).
    let store = VaultStore::initialize(db, &paths.salt_store(), password.as_bytes())?;

    output::success(&format!(
        "Vault created at {} ({} credentials)",
        paths.data_dir.display(),
        store.count()?
    ));
    output::warning(&format!(
        "Back up {} together with your exports; without it nothing can be decrypted.",
        paths.salt.display()
    ));
    output::tip("Run `lockup add <SERVICE> <USERNAME>` to store a credential.");

    Ok(())
}
