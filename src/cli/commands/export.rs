//! `lockup export`: write an authenticated transcript of every credential.

use std::path::Path;

use crate::cli::output;
use crate::cli::{unlock_vault, vault_paths, Cli};
use crate::errors::{LockupError, Result};
use crate::vault::transcript;

/// Execute the `export` command.
pub fn execute(cli: &Cli, file: &str) -> Result<()> {
    let dest = Path::new(file);
    let paths = vault_paths(cli)?;

    // Safety: refuse to export over the vault's own artifacts.
    for artifact in [&paths.database, &paths.salt] {
        if dest.canonicalize().ok() == artifact.canonicalize().ok() && dest.exists() {
            return Err(LockupError::CommandFailed(format!(
                "refusing to export over {}",
                artifact.display()
            )));
        }
    }

    let store = unlock_vault(cli)?;
    let count = transcript::export_to_file(&store, dest)?;

    output::success(&format!("Exported {count} credentials to {}", dest.display()));
    output::tip("The transcript can only be imported with the same master password and salt file.");

    Ok(())
}
