//! `lockup delete`: remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::{LockupError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: i64, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete record {id}?"))
            .default(false)
            .interact()
            .map_err(|e| LockupError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let store = unlock_vault(cli)?;

    if store.delete(id)? {
        output::success(&format!("Deleted record {id}"));
    } else {
        output::info(&format!("Record {id} does not exist; nothing to delete."));
    }

    Ok(())
}
