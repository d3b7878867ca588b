//! Capability interface over the underlying version-control tool.
//!
//! Discovery, reconciliation and materialization depend only on the [`Vcs`]
//! trait, so tests can substitute an in-memory backend. [`GitBackend`] is
//! the real implementation and shells out to `git`.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;

const GIT_OPERATION_TIMEOUT_SECS: u64 = 180; // 3 minutes per repository

/// Runs a git command in the specified directory with a timeout.
/// Returns (success, stdout, stderr).
pub async fn run_git(path: &Path, args: &[&str]) -> Result<(bool, String, String)> {
    let timeout_duration = Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS);

    let result = tokio::time::timeout(
        timeout_duration,
        Command::new("git").args(args).current_dir(path).output(),
    )
    .await;

    match result {
        Ok(Ok(output)) => Ok((
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(anyhow::anyhow!(
            "Git operation timed out after {} seconds",
            GIT_OPERATION_TIMEOUT_SECS
        )),
    }
}

/// Check if a .git file (for submodules/worktrees) contains a gitdir reference.
/// Only reads the first 5 lines for efficiency.
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            reader
                .lines()
                .take(5)
                .filter_map(Result::ok)
                .any(|line| line.trim_start().starts_with("gitdir:"))
        }
        Err(_) => false,
    }
}

/// The version-control operations the reconciliation engine needs.
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Cheap on-disk probe; must not spawn a process or touch the network.
    fn is_working_copy(&self, path: &Path) -> bool;

    /// Reads the remotes actually configured in the working copy at `path`.
    async fn read_remotes(&self, path: &Path) -> Result<BTreeMap<String, String>>;

    /// Creates an empty working copy at `path` with zero remotes.
    async fn init_working_copy(&self, path: &Path) -> Result<()>;

    async fn add_remote(&self, path: &Path, name: &str, url: &str) -> Result<()>;

    async fn set_remote_url(&self, path: &Path, name: &str, url: &str) -> Result<()>;
}

/// Real backend delegating to the `git` binary.
pub struct GitBackend;

#[async_trait]
impl Vcs for GitBackend {
    fn is_working_copy(&self, path: &Path) -> bool {
        let marker = path.join(".git");
        match fs::metadata(&marker) {
            Ok(meta) if meta.is_dir() => true,
            // Submodules and worktrees expose a .git file
            Ok(meta) if meta.is_file() => is_git_file(&marker),
            _ => false,
        }
    }

    async fn read_remotes(&self, path: &Path) -> Result<BTreeMap<String, String>> {
        let (success, stdout, stderr) = run_git(path, &["remote", "-v"]).await?;
        if !success {
            anyhow::bail!("failed to list remotes in {}: {}", path.display(), stderr);
        }
        let mut remotes = BTreeMap::new();
        for line in stdout.lines() {
            // "origin  https://example.com/foo.git (fetch)"
            let mut parts = line.split_whitespace();
            if let (Some(name), Some(url), Some(kind)) = (parts.next(), parts.next(), parts.next())
            {
                if kind == "(fetch)" {
                    remotes.insert(name.to_string(), url.to_string());
                }
            }
        }
        Ok(remotes)
    }

    async fn init_working_copy(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path).await?;
        let (success, _, stderr) = run_git(path, &["init", "-q"]).await?;
        if !success {
            anyhow::bail!("failed to initialize {}: {}", path.display(), stderr);
        }
        Ok(())
    }

    async fn add_remote(&self, path: &Path, name: &str, url: &str) -> Result<()> {
        let (success, _, stderr) = run_git(path, &["remote", "add", name, url]).await?;
        if !success {
            anyhow::bail!(
                "failed to add remote \"{}\" in {}: {}",
                name,
                path.display(),
                stderr
            );
        }
        Ok(())
    }

    async fn set_remote_url(&self, path: &Path, name: &str, url: &str) -> Result<()> {
        let (success, _, stderr) = run_git(path, &["remote", "set-url", name, url]).await?;
        if !success {
            anyhow::bail!(
                "failed to set url of remote \"{}\" in {}: {}",
                name,
                path.display(),
                stderr
            );
        }
        Ok(())
    }
}
