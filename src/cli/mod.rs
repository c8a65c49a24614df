//! CLI module: Clap argument parser, prompts, output helpers, and command
//! implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::{Zeroize, Zeroizing};

use crate::config::Settings;
use crate::crypto::SaltStore;
use crate::errors::{LockupError, Result};
use crate::session::Session;
use crate::vault::{store, Authenticator, VaultStore};

/// Environment variable for non-interactive master password input.
pub const PASSWORD_ENV: &str = "LOCKUP_PASSWORD";

/// Interactive unlock attempts before giving up.
const MAX_UNLOCK_ATTEMPTS: usize = 3;

/// Lockup CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(name = "lockup", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault data directory (default: .lockup, or `data_dir` in .lockup.toml)
    #[arg(long, env = "LOCKUP_DATA_DIR", global = true)]
    pub data_dir: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the vault and set the master password
    Init,

    /// Add a credential
    Add {
        /// Service name (e.g. github.com)
        service: String,
        /// Account user name
        username: String,
        /// Password (omit for interactive prompt or piped stdin)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List all credentials
    List,

    /// Show one credential with its decrypted password
    Show {
        /// Record id
        id: i64,
    },

    /// Update a credential (unspecified fields keep their value)
    Update {
        /// Record id
        id: i64,
        /// New service name
        #[arg(long)]
        service: Option<String>,
        /// New user name
        #[arg(long)]
        username: Option<String>,
        /// New password
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Delete a credential
    Delete {
        /// Record id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Export all credentials to an authenticated transcript
    Export {
        /// Output file path
        file: String,
    },

    /// Import credentials from a transcript
    Import {
        /// Path to the transcript file
        file: String,
    },

    /// Change the master password and re-encrypt every credential
    ResetPassword,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved on-disk locations of one vault.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub data_dir: PathBuf,
    pub database: PathBuf,
    pub salt: PathBuf,
}

impl VaultPaths {
    pub fn salt_store(&self) -> SaltStore {
        SaltStore::new(&self.salt)
    }
}

/// Build the vault paths from `.lockup.toml` and the CLI arguments.
pub fn vault_paths(cli: &Cli) -> Result<VaultPaths> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let data_dir = settings.data_dir(&cwd, cli.data_dir.as_deref());
    Ok(VaultPaths {
        database: settings.database_path(&data_dir),
        salt: settings.salt_path(&data_dir),
        data_dir,
    })
}

/// Read `LOCKUP_PASSWORD` if it is set and non-empty.
fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Prompt for the master password (or take it from `LOCKUP_PASSWORD`).
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| LockupError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// Also respects `LOCKUP_PASSWORD` for scripted usage. Only an empty
/// password is refused.
pub fn prompt_new_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .allow_empty_password(true)
            .interact()
            .map_err(|e| LockupError::CommandFailed(format!("password prompt: {e}")))?;

        if password.is_empty() {
            output::warning("The master password cannot be empty. Try again.");
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Open an existing vault and unlock it.
///
/// Interactive attempts are retried with a fresh, empty prompt; a password
/// from `LOCKUP_PASSWORD` gets exactly one try.
pub fn unlock_vault(cli: &Cli) -> Result<VaultStore> {
    let paths = vault_paths(cli)?;
    let db = store::open_existing(&paths.database)?;
    if !Authenticator::new(&db).exists()? {
        return Err(LockupError::MasterPasswordNotSet);
    }
    let salt_store = paths.salt_store();

    if let Some(pw) = password_from_env() {
        return VaultStore::unlock(db, &salt_store, pw.as_bytes());
    }

    for attempt in 1..=MAX_UNLOCK_ATTEMPTS {
        let password = prompt_password("Master password")?;
        match Session::unlock(&db, &salt_store, password.as_bytes()) {
            Ok(session) => return Ok(VaultStore::new(db, session)),
            Err(LockupError::WrongMasterPassword) if attempt < MAX_UNLOCK_ATTEMPTS => {
                output::error("Wrong master password, try again.");
            }
            Err(e) => return Err(e),
        }
    }

    Err(LockupError::WrongMasterPassword)
}

/// Read a credential password from the flag, piped stdin, or a hidden prompt.
pub fn read_credential_password(flag: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    use std::io::{self, IsTerminal, Read};

    if let Some(v) = flag {
        output::warning("Password provided on command line; it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let value = Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string());
        buf.zeroize();
        return Ok(value);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| LockupError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
