//! `lockup import`: load credentials from a transcript.
//!
//! The whole file is checked before anything is written; a single bad line
//! leaves the vault untouched.

use std::path::Path;

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::{LockupError, Result};
use crate::vault::transcript;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &str) -> Result<()> {
    let source = Path::new(file);

    if !source.exists() {
        return Err(LockupError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let mut store = unlock_vault(cli)?;

    match transcript::import_from_file(&mut store, source) {
        Ok(0) => {
            output::warning("No credentials found in the transcript.");
            Ok(())
        }
        Ok(count) => {
            output::success(&format!(
                "Imported {count} credentials from {} ({} total)",
                source.display(),
                store.count()?
            ));
            Ok(())
        }
        Err(e @ LockupError::IntegrityFailed { line: 1 }) => {
            output::tip(
                "The first line failed: the transcript was likely exported under a different \
                 master password or salt file.",
            );
            Err(e)
        }
        Err(e @ LockupError::IntegrityFailed { .. }) => {
            output::tip("Earlier lines verified: the file itself looks corrupted or edited.");
            Err(e)
        }
        Err(e) => Err(e),
    }
}
