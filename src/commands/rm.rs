//! `rm`: stop tracking repositories, optionally removing them from disk.

use std::path::Path;

use anyhow::Result;

use crate::filter::filter_paths;
use crate::store::TrackingRecord;

pub fn handle_rm_command(dir: &Path, keep: bool, patterns: &[String]) -> Result<()> {
    let mut record = TrackingRecord::load(dir)?;

    let tracked: Vec<String> = record.paths().map(str::to_string).collect();
    let selected = filter_paths(tracked, patterns)?;
    if selected.is_empty() {
        println!("No tracked repositories match.");
        return Ok(());
    }

    for path in &selected {
        if keep {
            record.remove(path);
            println!("Untracked \"{path}\" (kept on disk).");
            continue;
        }
        let abs = record.root().join(path);
        if abs.exists() {
            if let Err(e) = std::fs::remove_dir_all(&abs) {
                // Leave the entry tracked so a later rm or checkout can
                // still reconcile whatever is left on disk.
                eprintln!("warning: {path}: failed to remove {}: {e}", abs.display());
                continue;
            }
        }
        record.remove(path);
        println!("Untracked \"{path}\" and removed it from disk.");
    }
    record.save()?;
    Ok(())
}
