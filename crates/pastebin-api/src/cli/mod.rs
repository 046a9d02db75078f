//! CLI command definitions for the `pastebin` binary.
//!
//! Uses clap derive macros for argument parsing. Resources are grouped under
//! noun subcommands (e.g., `pastebin snippet list`, `pastebin user create`).

pub mod snippet;
pub mod user;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Share code snippets over a small REST API.
#[derive(Parser)]
#[command(name = "pastebin", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the database and config.toml
    /// (default: $PASTEBIN_DATA_DIR, then ~/.pastebin).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config.toml).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to (overrides config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage users.
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Manage snippets.
    Snippet {
        #[command(subcommand)]
        command: SnippetCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a user who can authenticate against the API.
    Create {
        /// Login name (letters, digits and @/./+/-/_).
        username: String,

        /// Contact email.
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted for when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// List users.
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum SnippetCommand {
    /// List snippets.
    #[command(alias = "ls")]
    List,

    /// Print a snippet with syntax highlighting.
    Show {
        /// Snippet id.
        id: i64,
    },

    /// Create a snippet from a file or stdin.
    Create {
        /// File to read code from (stdin when omitted).
        file: Option<PathBuf>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        style: Option<String>,

        /// Render with line numbers.
        #[arg(long)]
        linenos: bool,

        /// Username to record as owner.
        #[arg(long)]
        owner: Option<String>,
    },

    /// Delete a snippet.
    #[command(alias = "rm")]
    Delete {
        /// Snippet id.
        id: i64,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
