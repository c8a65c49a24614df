//! `lockup add`: store a new credential.

use crate::cli::output;
use crate::cli::{read_credential_password, unlock_vault, Cli};
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(cli: &Cli, service: &str, username: &str, password: Option<&str>) -> Result<()> {
    let secret = read_credential_password(password, &format!("Password for {username}@{service}"))?;

    let store = unlock_vault(cli)?;
    let id = store.add(service, username, &secret)?;

    output::success(&format!(
        "Added '{service}' ({username}) as record {id} ({} total)",
        store.count()?
    ));

    Ok(())
}
