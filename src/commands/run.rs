//! `do`: run a command in every available tracked repository.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::run_concurrency;
use crate::discovery::discover_managed_available;
use crate::filter::filter_paths;
use crate::runner::run_command;
use crate::store::TrackingRecord;
use crate::vcs::GitBackend;

pub async fn handle_do_command(
    dir: &Path,
    jobs: Option<usize>,
    command: &[String],
    patterns: &[String],
) -> Result<()> {
    let vcs = GitBackend;
    let record = TrackingRecord::load(dir)?;

    let available = discover_managed_available(&record, &vcs);
    let selected = filter_paths(available, patterns)?;
    if selected.is_empty() {
        println!("No available tracked repositories match.");
        return Ok(());
    }

    let repos: Vec<(String, PathBuf)> = selected
        .iter()
        .map(|path| (path.clone(), record.root().join(path)))
        .collect();
    let total = repos.len();

    let mut results = run_command(command.to_vec(), run_concurrency(jobs), repos);
    let mut failures = 0usize;
    while let Some(result) = results.recv().await {
        let marker = if result.success { "ok" } else { "FAILED" };
        println!("=== {} ({marker}) ===", result.path);
        let output = result.output.trim_end();
        if !output.is_empty() {
            println!("{output}");
        }
        if !result.success {
            failures += 1;
        }
    }
    if failures > 0 {
        println!("{failures} of {total} repositories failed.");
    }
    Ok(())
}
