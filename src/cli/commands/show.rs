//! `lockup show`: print one credential with its decrypted password.

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::{LockupError, Result};

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: i64) -> Result<()> {
    let store = unlock_vault(cli)?;

    let record = store
        .get_by_id(id)?
        .ok_or(LockupError::RecordNotFound(id))?;
    let password = zeroize::Zeroizing::new(store.reveal_password(&record)?);

    output::print_record(&record, &password);

    Ok(())
}
