//! Merging observed repository state into the tracking record.
//!
//! This is the `add` direction: the working copies on disk are the source
//! of truth and the record absorbs what they report. Without `force`, a
//! recorded URL that disagrees with the live one stays untouched and a
//! warning is emitted; with `force`, the live URL wins. The inverse
//! direction lives in [`crate::materialize`].

use std::collections::BTreeMap;

use crate::store::TrackingRecord;

/// A working copy observed on disk, with the remotes it actually carries.
/// Ephemeral: exists only for the duration of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct DiscoveredRepo {
    /// Slash-separated path relative to the managed root.
    pub path: String,
    /// Remote name to URL, as read from the working copy.
    pub remotes: BTreeMap<String, String>,
}

/// Merges `discovered` into `record`, returning the warnings to display.
///
/// Per repository: a missing entry is created empty; an unrecorded remote is
/// recorded unconditionally; matching URLs are a no-op; diverging URLs are
/// skipped with a warning unless `force`. Remotes present in the record but
/// absent on disk are left alone — this pass never deletes.
pub fn reconcile_add(
    record: &mut TrackingRecord,
    discovered: &[DiscoveredRepo],
    force: bool,
) -> Vec<String> {
    let mut warnings = Vec::new();
    for repo in discovered {
        let entry = record.entry_mut_or_default(&repo.path);
        for (name, live_url) in &repo.remotes {
            match entry.remotes.get(name).cloned() {
                None => {
                    entry.remotes.insert(name.clone(), live_url.clone());
                }
                Some(recorded) if recorded == *live_url => {}
                Some(recorded) => {
                    if force {
                        entry.remotes.insert(name.clone(), live_url.clone());
                    } else {
                        warnings.push(format!(
                            "{}: remote \"{}\" is tracked as {} but is {} on disk; \
                             rerun with --force to record the on-disk URL",
                            repo.path, name, recorded, live_url
                        ));
                    }
                }
            }
        }
    }
    warnings
}
