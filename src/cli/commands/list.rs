//! `lockup list`: display all credentials in a table.

use crate::cli::output;
use crate::cli::{unlock_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = unlock_vault(cli)?;
    let records = store.get_all()?;

    output::info(&format!("{} credential(s)", records.len()));
    output::print_records_table(&records);

    Ok(())
}
