//! `add`: merge repositories found on disk into the tracking record.

use std::path::Path;

use anyhow::Result;

use crate::discovery::discover_all;
use crate::filter::filter_paths;
use crate::reconcile::{reconcile_add, DiscoveredRepo};
use crate::store::TrackingRecord;
use crate::vcs::{GitBackend, Vcs};

pub async fn handle_add_command(dir: &Path, force: bool, patterns: &[String]) -> Result<()> {
    let vcs = GitBackend;
    let mut record = TrackingRecord::load(dir)?;

    let candidates = discover_all(record.root(), &vcs);
    let selected = filter_paths(candidates, patterns)?;
    if selected.is_empty() {
        println!("No repositories found under \"{}\".", record.root().display());
        return Ok(());
    }

    let mut discovered = Vec::with_capacity(selected.len());
    for path in &selected {
        let abs = record.root().join(path);
        match vcs.read_remotes(&abs).await {
            Ok(remotes) => discovered.push(DiscoveredRepo {
                path: path.clone(),
                remotes,
            }),
            // Unreadable repositories are skipped, not fatal.
            Err(e) => eprintln!("warning: {path}: could not read remotes: {e:#}"),
        }
    }

    let warnings = reconcile_add(&mut record, &discovered, force);
    record.save()?;

    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    let repo_word = if discovered.len() == 1 {
        "repository"
    } else {
        "repositories"
    };
    println!("Tracking {} {repo_word}.", discovered.len());
    Ok(())
}
