//! Pushing the tracking record's intent back onto disk.
//!
//! This is the `checkout` direction: the record is the source of truth.
//! Missing working copies are initialized empty, missing remotes are
//! created, and a live URL that disagrees with the recorded one is only
//! overwritten under `force` — otherwise it stays and a warning is emitted.
//! Note the asymmetry with [`crate::reconcile`]: there the live URL wins
//! when forced, here the recorded one does.

use anyhow::Result;

use crate::store::TrackingRecord;
use crate::vcs::Vcs;

/// What a materialization pass did and what it refused to do.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// Side effects applied to disk, one line per action.
    pub actions: Vec<String>,
    /// Conflicts skipped and per-repository failures.
    pub warnings: Vec<String>,
}

/// Ensures each selected tracked repository exists on disk with the
/// recorded remotes. A failure in one repository is reported as a warning
/// and the pass continues with the rest.
pub async fn materialize(
    record: &TrackingRecord,
    selected: &[String],
    force: bool,
    vcs: &dyn Vcs,
) -> MaterializeReport {
    let mut report = MaterializeReport::default();
    for path in selected {
        if let Err(e) = materialize_one(record, path, force, vcs, &mut report).await {
            report.warnings.push(format!("{path}: {e:#}"));
        }
    }
    report
}

async fn materialize_one(
    record: &TrackingRecord,
    path: &str,
    force: bool,
    vcs: &dyn Vcs,
    report: &mut MaterializeReport,
) -> Result<()> {
    let Some(entry) = record.entry(path) else {
        return Ok(());
    };
    let abs = record.root().join(path);
    if !vcs.is_working_copy(&abs) {
        vcs.init_working_copy(&abs).await?;
        report
            .actions
            .push(format!("{path}: initialized empty working copy"));
    }
    let live = vcs.read_remotes(&abs).await?;
    for (name, recorded_url) in &entry.remotes {
        match live.get(name) {
            None => {
                vcs.add_remote(&abs, name, recorded_url).await?;
                report
                    .actions
                    .push(format!("{path}: added remote \"{name}\" -> {recorded_url}"));
            }
            Some(live_url) if live_url == recorded_url => {}
            Some(live_url) => {
                if force {
                    vcs.set_remote_url(&abs, name, recorded_url).await?;
                    report
                        .actions
                        .push(format!("{path}: remote \"{name}\" set to {recorded_url}"));
                } else {
                    report.warnings.push(format!(
                        "{path}: remote \"{name}\" is {live_url} on disk but tracked as \
                         {recorded_url}; rerun with --force to overwrite the on-disk URL"
                    ));
                }
            }
        }
    }
    Ok(())
}
