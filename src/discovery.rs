//! Repository discovery under a managed root.

use std::path::Path;

use crate::store::TrackingRecord;
use crate::vcs::Vcs;

/// Walks the directory tree under `root` and returns the slash-separated
/// relative paths of every working copy found, sorted.
///
/// A directory that is itself a working copy is recorded and not descended
/// into, so repositories nested inside another repository are never
/// reported. Unreadable subtrees are skipped rather than failing the walk,
/// and symlinked directories are not followed (cycle guard).
pub fn discover_all(root: &Path, vcs: &dyn Vcs) -> Vec<String> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_dir() {
                continue;
            }
            let path = entry.path();
            if vcs.is_working_copy(&path) {
                if let Some(rel) = relative_slash_path(root, &path) {
                    found.push(rel);
                }
            } else {
                pending.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Lazily yields, in record order, each tracked path whose working copy
/// currently exists on disk. Single pass, consumed once by the batch runner.
pub fn discover_managed_available<'a>(
    record: &'a TrackingRecord,
    vcs: &'a dyn Vcs,
) -> impl Iterator<Item = String> + 'a {
    record
        .paths()
        .filter(move |path| vcs.is_working_copy(&record.root().join(path)))
        .map(str::to_string)
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
