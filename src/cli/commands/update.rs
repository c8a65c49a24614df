//! `lockup update`: change a credential's fields.
//!
//! Fields not given on the command line keep their current value. The
//! password is always re-encrypted and the timestamp refreshed.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::{LockupError, Result};

/// Execute the `update` command.
pub fn execute(
    cli: &Cli,
    id: i64,
    service: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    if password.is_some() {
        output::warning("Password provided on command line; it may appear in shell history.");
    }

    let store = unlock_vault(cli)?;
    let current = store
        .get_by_id(id)?
        .ok_or(LockupError::RecordNotFound(id))?;

    let new_password = match password {
        Some(p) => Zeroizing::new(p.to_string()),
        None => Zeroizing::new(store.reveal_password(&current)?),
    };

    store.update(
        id,
        service.unwrap_or(&current.service),
        username.unwrap_or(&current.username),
        &new_password,
    )?;

    output::success(&format!("Updated record {id}"));

    Ok(())
}
