//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialRecord;

/// What the password column shows instead of the ciphertext.
const PASSWORD_MASK: &str = "••••••••••••";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credentials with masked passwords.
pub fn print_records_table(records: &[CredentialRecord]) {
    if records.is_empty() {
        info("No credentials in this vault yet.");
        tip("Run `lockup add <SERVICE> <USERNAME>` to add your first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Service", "Username", "Password", "Last updated"]);

    for r in records {
        table.add_row(vec![
            r.id.to_string(),
            r.service.clone(),
            r.username.clone(),
            PASSWORD_MASK.to_string(),
            r.last_updated.clone(),
        ]);
    }

    println!("{table}");
}

/// Print one credential with its decrypted password.
pub fn print_record(record: &CredentialRecord, password: &str) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["ID".to_string(), record.id.to_string()]);
    table.add_row(vec!["Service".to_string(), record.service.clone()]);
    table.add_row(vec!["Username".to_string(), record.username.clone()]);
    table.add_row(vec!["Password".to_string(), password.to_string()]);
    table.add_row(vec!["Last updated".to_string(), record.last_updated.clone()]);
    println!("{table}");
}
