//! `init`: mark a directory as a repostack root.

use std::path::Path;

use anyhow::Result;

use crate::store::TrackingRecord;

pub fn handle_init_command(dir: &Path) -> Result<()> {
    let record = TrackingRecord::initialize(dir)?;
    println!(
        "Directory \"{}\" is now managed by repostack.",
        record.root().display()
    );
    Ok(())
}
