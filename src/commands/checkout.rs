//! `checkout`: make tracked repositories on disk match the record.

use std::path::Path;

use anyhow::Result;

use crate::filter::filter_paths;
use crate::materialize::materialize;
use crate::store::TrackingRecord;
use crate::vcs::GitBackend;

pub async fn handle_checkout_command(dir: &Path, force: bool, patterns: &[String]) -> Result<()> {
    let vcs = GitBackend;
    let record = TrackingRecord::load(dir)?;

    let tracked: Vec<String> = record.paths().map(str::to_string).collect();
    let selected = filter_paths(tracked, patterns)?;
    if selected.is_empty() {
        println!("No tracked repositories match.");
        return Ok(());
    }

    let report = materialize(&record, &selected, force, &vcs).await;
    for action in &report.actions {
        println!("{action}");
    }
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    if report.actions.is_empty() && report.warnings.is_empty() {
        println!("Everything up to date.");
    }
    Ok(())
}
