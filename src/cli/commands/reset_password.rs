//! `lockup reset-password`: change the master password.
//!
//! Unlocks with the current password, then re-derives the keys from the new
//! password and re-encrypts every stored credential in one transaction.

use crate::cli::output;
use crate::cli::{prompt_new_password, unlock_vault, Cli};
use crate::errors::Result;

/// Execute the `reset-password` command.
pub fn execute(cli: &Cli) -> Result<()> {
    // 1. Open the vault with the current password.
    output::info("Enter your current master password.");
    let mut store = unlock_vault(cli)?;

    // 2. Prompt for the new password.
    output::info("Choose your new master password.");
    let new_password = prompt_new_password("New master password")?;

    // 3. Re-encrypt and replace the verification record atomically.
    let count = store.reset_master_password(new_password.as_bytes())?;

    output::success(&format!(
        "Master password changed ({count} credentials re-encrypted)"
    ));
    output::warning("Transcripts exported before this change can no longer be imported.");

    Ok(())
}
