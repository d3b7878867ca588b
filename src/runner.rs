//! Bounded-parallel command execution across working copies.
//!
//! Each selected repository gets exactly one [`RunResult`], success or
//! failure: a non-zero exit or a spawn error is captured as text tagged
//! with the repository path, never raised out of the runner. Results are
//! streamed in completion order so a hanging command in one repository
//! stays visible without blocking output for the others.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::process::Command;
use tokio::sync::{mpsc, Semaphore};

/// One repository's outcome. Failures are data, not errors.
#[derive(Debug)]
pub struct RunResult {
    /// Tracked path of the repository the command ran in.
    pub path: String,
    pub success: bool,
    /// Combined stdout and stderr, or a description of the failure.
    pub output: String,
}

/// Runs `argv` in every repository through a worker pool of width `jobs`,
/// returning a channel that yields results as they complete. Ordering
/// across repositories follows completion, not input order.
pub fn run_command(
    argv: Vec<String>,
    jobs: usize,
    repos: Vec<(String, PathBuf)>,
) -> mpsc::Receiver<RunResult> {
    let jobs = jobs.max(1);
    let (tx, rx) = mpsc::channel(jobs);
    let semaphore = Arc::new(Semaphore::new(jobs));
    let argv = Arc::new(argv);

    tokio::spawn(async move {
        let mut futures = FuturesUnordered::new();
        for (rel, dir) in repos {
            let semaphore = Arc::clone(&semaphore);
            let argv = Arc::clone(&argv);
            let tx = tx.clone();
            futures.push(async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .expect("failed to acquire semaphore permit for batch execution");
                let result = run_in_repo(&argv, rel, &dir).await;
                // A closed receiver means the caller stopped listening;
                // in-flight commands still ran to completion.
                let _ = tx.send(result).await;
            });
        }
        while futures.next().await.is_some() {}
    });

    rx
}

async fn run_in_repo(argv: &[String], rel: String, dir: &Path) -> RunResult {
    let Some((program, args)) = argv.split_first() else {
        return RunResult {
            path: rel,
            success: false,
            output: "no command given".to_string(),
        };
    };
    let spawned = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .await;

    match spawned {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(stderr.trim_end());
            }
            if output.status.success() {
                RunResult {
                    path: rel,
                    success: true,
                    output: text,
                }
            } else {
                let code = output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string());
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(&format!("command exited with status {code}"));
                RunResult {
                    path: rel,
                    success: false,
                    output: text,
                }
            }
        }
        Err(e) => RunResult {
            path: rel,
            success: false,
            output: format!("failed to run command: {e}"),
        },
    }
}
