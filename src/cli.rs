//! Command-line surface.
//!
//! Supported operations are a closed enum; clap rejects unknown
//! subcommands with a typed error before any handler runs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "repostack",
    version,
    about = "Track a stack of Git repositories and reconcile their remotes"
)]
pub struct Cli {
    /// Root directory of the repository stack
    #[arg(short, long, global = true, default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a new repostack root
    Init,

    /// Track repositories found under the root
    Add {
        /// Overwrite tracked remote URLs that conflict with the on-disk ones
        #[arg(short, long)]
        force: bool,

        /// Glob patterns selecting repositories (default: all discovered)
        patterns: Vec<String>,
    },

    /// Stop tracking repositories
    Rm {
        /// Keep the working copies on disk
        #[arg(short, long)]
        keep: bool,

        /// Glob patterns selecting tracked repositories
        #[arg(required = true)]
        patterns: Vec<String>,
    },

    /// Make tracked repositories on disk match the record
    Checkout {
        /// Overwrite on-disk remote URLs that conflict with the tracked ones
        #[arg(short, long)]
        force: bool,

        /// Glob patterns selecting tracked repositories
        #[arg(required = true)]
        patterns: Vec<String>,
    },

    /// Run a command in every available tracked repository
    Do {
        /// Number of repositories to run in concurrently
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Command and its arguments
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        command: Vec<String>,

        /// Glob patterns selecting repositories, given after "--"
        #[arg(last = true)]
        patterns: Vec<String>,
    },

    /// Show repository status (not implemented yet)
    Status {
        patterns: Vec<String>,
    },

    /// Show diverged remotes (not implemented yet)
    Diff {
        patterns: Vec<String>,
    },
}
