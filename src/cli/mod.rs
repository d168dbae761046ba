pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::app_config::StoreBackend;

/// Credential storage, RSA key lifecycle, protected files and a named clipboard.
#[derive(Parser, Debug)]
#[command(name = "seckit", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Home directory holding config, store and identity
    #[arg(long, global = true, env = "SECKIT_HOME")]
    pub home: Option<PathBuf>,

    /// Override the configured secure store backend
    #[arg(long, global = true, value_enum)]
    pub store: Option<StoreBackend>,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the home directory, config and local identity
    Init,

    /// Store a credential (fails if the name is taken)
    Set {
        /// Credential name
        key: String,
        /// Secret value
        value: String,
    },

    /// Print a stored credential
    Get {
        /// Credential name
        key: String,
    },

    /// Delete a stored credential
    Remove {
        /// Credential name
        key: String,
    },

    /// Inspect the application key pair
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// Encrypt text with the public key (prints base64)
    Encrypt {
        /// Text to encrypt
        text: String,
    },

    /// Decrypt base64 ciphertext with the private key
    Decrypt {
        /// Base64 ciphertext from 'seckit encrypt'
        ciphertext: String,
    },

    /// Write or read files with data protection
    Protect {
        #[command(subcommand)]
        action: ProtectAction,
    },

    /// Use the named shared clipboard
    Clip {
        #[command(subcommand)]
        action: ClipAction,
    },

    /// Show operation history
    Log {
        /// Only show one action (e.g. set, remove, encrypt)
        #[arg(long)]
        action: Option<String>,
        /// Filter entries since this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
    },

    /// Run every feature once and print the results
    Demo,
}

#[derive(Subcommand, Debug)]
pub enum KeysAction {
    /// Resolve (or generate) the key pair and show its details
    Show {
        /// Also print the public key as PEM
        #[arg(long)]
        pem: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProtectAction {
    /// Save text to a file with the given protection level
    Write {
        /// Destination file
        path: PathBuf,
        /// Text to save
        text: String,
        /// none, owner-only or complete
        #[arg(long, default_value = "complete")]
        level: String,
    },
    /// Read a protected file
    Read {
        /// File to read
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClipAction {
    /// Copy text to the clipboard
    Copy {
        /// Text to copy
        text: String,
    },
    /// Cut text to the clipboard (the field is left empty)
    Cut {
        /// Text to cut
        text: String,
    },
    /// Print the clipboard contents
    Paste,
    /// Empty the clipboard
    Clear,
}
