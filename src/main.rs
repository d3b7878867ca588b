//! repostack: track a stack of Git repositories and reconcile their remotes.

use anyhow::Result;
use clap::Parser;

use repostack::cli::{Cli, Command};
use repostack::commands::{
    handle_add_command, handle_checkout_command, handle_do_command, handle_init_command,
    handle_rm_command,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init => handle_init_command(&cli.dir),
        Command::Add { force, patterns } => handle_add_command(&cli.dir, force, &patterns).await,
        Command::Rm { keep, patterns } => handle_rm_command(&cli.dir, keep, &patterns),
        Command::Checkout { force, patterns } => {
            handle_checkout_command(&cli.dir, force, &patterns).await
        }
        Command::Do {
            jobs,
            command,
            patterns,
        } => handle_do_command(&cli.dir, jobs, &command, &patterns).await,
        Command::Status { .. } => anyhow::bail!("\"status\" is not implemented yet"),
        Command::Diff { .. } => anyhow::bail!("\"diff\" is not implemented yet"),
    }
}
