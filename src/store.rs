//! Persisted tracking state.
//!
//! The tracking file is one TOML document per managed root: a table per
//! tracked repository, named by the repository's slash-separated path
//! relative to the root, with `remote_<name> = "<url>"` keys inside. The
//! presence of the file is the sole on-disk marker that a root is managed.
//!
//! A `TrackingRecord` is loaded once at the start of an operation, mutated
//! in memory, and saved once at the end. No component outside this module
//! touches the backing file.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Name of the tracking file that marks a managed root.
pub const TRACK_FILE: &str = ".repostack";

const REMOTE_KEY_PREFIX: &str = "remote_";

/// One tracked repository: the remotes it is intended to carry.
///
/// The record is not exhaustive: a remote absent from `remotes` may still
/// exist in the working copy, and reconciliation never deletes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoEntry {
    /// Remote name to URL.
    pub remotes: BTreeMap<String, String>,
}

impl RepoEntry {
    fn from_section(section: BTreeMap<String, String>) -> Self {
        let remotes = section
            .into_iter()
            .filter_map(|(key, url)| {
                key.strip_prefix(REMOTE_KEY_PREFIX)
                    .map(|name| (name.to_string(), url))
            })
            .collect();
        Self { remotes }
    }

    fn to_section(&self) -> BTreeMap<String, String> {
        self.remotes
            .iter()
            .map(|(name, url)| (format!("{REMOTE_KEY_PREFIX}{name}"), url.clone()))
            .collect()
    }
}

/// On-disk shape of the tracking file: one table per tracked path, holding
/// that entry's raw `remote_*` keys.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct TrackDocument(BTreeMap<String, BTreeMap<String, String>>);

/// The full tracking record for one managed root, keyed by repository path.
#[derive(Debug, Clone)]
pub struct TrackingRecord {
    root: PathBuf,
    entries: BTreeMap<String, RepoEntry>,
}

impl TrackingRecord {
    /// Creates the tracking file for `root`, failing with `AlreadyManaged`
    /// if `root` or any ancestor already carries one. Creates the root
    /// directory itself when missing.
    pub fn initialize(root: impl AsRef<Path>) -> Result<Self> {
        let root = absolutize(root.as_ref())?;
        let file = track_file(&root);
        if file.exists() {
            return Err(StoreError::AlreadyManaged { path: file }.into());
        }
        let mut dir = root.as_path();
        while let Some(parent) = dir.parent() {
            let candidate = parent.join(TRACK_FILE);
            if candidate.exists() {
                return Err(StoreError::AlreadyManaged { path: candidate }.into());
            }
            dir = parent;
        }
        std::fs::create_dir_all(&root)
            .with_context(|| format!("failed to create root directory {}", root.display()))?;
        let record = Self {
            root,
            entries: BTreeMap::new(),
        };
        record.write_file()?;
        Ok(record)
    }

    /// Loads the record for `root`, failing with `NotManaged` when no
    /// tracking file exists at the exact root. Ancestors are only consulted
    /// by `initialize`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = absolutize(root.as_ref())?;
        let file = track_file(&root);
        if !file.exists() {
            return Err(StoreError::NotManaged { path: file }.into());
        }
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let doc: TrackDocument = toml::from_str(&text)
            .with_context(|| format!("malformed tracking file {}", file.display()))?;
        let entries = doc
            .0
            .into_iter()
            .map(|(path, section)| (path, RepoEntry::from_section(section)))
            .collect();
        Ok(Self { root, entries })
    }

    /// Persists the record, failing with `NotManaged` if the tracking file
    /// disappeared since load. The file is replaced whole, never appended.
    pub fn save(&self) -> Result<()> {
        let file = track_file(&self.root);
        if !file.exists() {
            return Err(StoreError::NotManaged { path: file }.into());
        }
        self.write_file()
    }

    fn write_file(&self) -> Result<()> {
        let doc = TrackDocument(
            self.entries
                .iter()
                .map(|(path, entry)| (path.clone(), entry.to_section()))
                .collect(),
        );
        let text = toml::to_string(&doc).context("failed to serialize tracking record")?;
        let file = track_file(&self.root);
        let tmp = self.root.join(format!("{TRACK_FILE}.tmp"));
        std::fs::write(&tmp, text)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &file)
            .with_context(|| format!("failed to replace {}", file.display()))?;
        Ok(())
    }

    /// Absolute path of the managed root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tracked repository paths, in stable (sorted) order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, in stable order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RepoEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    pub fn entry(&self, path: &str) -> Option<&RepoEntry> {
        self.entries.get(path)
    }

    /// Returns the entry for `path`, creating an empty one if absent.
    pub fn entry_mut_or_default(&mut self, path: &str) -> &mut RepoEntry {
        self.entries.entry(path.to_string()).or_default()
    }

    pub fn remove(&mut self, path: &str) -> Option<RepoEntry> {
        self.entries.remove(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn track_file(root: &Path) -> PathBuf {
    root.join(TRACK_FILE)
}

// Lexical normalization: `.` and `..` components must be resolved before
// the ancestor walk in `initialize`, or a root like `sub/..` would compare
// against the wrong directories. Symlinks are deliberately not resolved
// (the root may not exist yet).
fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to determine current directory")?
            .join(path)
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use tempfile::TempDir;

    fn store_error(err: anyhow::Error) -> StoreError {
        err.downcast::<StoreError>().expect("expected a StoreError")
    }

    #[test]
    fn initialize_creates_empty_tracking_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("stack");
        assert!(!root.exists());

        let record = TrackingRecord::initialize(&root).unwrap();
        assert!(root.join(TRACK_FILE).exists());
        assert!(record.is_empty());
        assert_eq!(record.root(), root);
    }

    #[test]
    fn initialize_rejects_already_managed_root() {
        let tmp = TempDir::new().unwrap();
        TrackingRecord::initialize(tmp.path()).unwrap();

        let err = store_error(TrackingRecord::initialize(tmp.path()).unwrap_err());
        assert!(matches!(err, StoreError::AlreadyManaged { .. }));
    }

    #[test]
    fn initialize_rejects_managed_ancestor() {
        let tmp = TempDir::new().unwrap();
        TrackingRecord::initialize(tmp.path()).unwrap();

        let child = tmp.path().join("child").join("tmpdir");
        let err = store_error(TrackingRecord::initialize(&child).unwrap_err());
        assert!(matches!(err, StoreError::AlreadyManaged { .. }));
        // The nested root must not be created when init is rejected.
        assert!(!child.exists());

        // Once the ancestor file is gone, the nested init succeeds.
        std::fs::remove_file(tmp.path().join(TRACK_FILE)).unwrap();
        TrackingRecord::initialize(&child).unwrap();
        assert!(child.join(TRACK_FILE).exists());
    }

    #[test]
    fn initialize_normalizes_dot_and_parent_components() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("a").join("..").join("stack").join(".");

        let record = TrackingRecord::initialize(&root).unwrap();
        assert_eq!(record.root(), tmp.path().join("stack"));
        assert!(tmp.path().join("stack").join(TRACK_FILE).exists());
    }

    #[test]
    fn initialize_sees_the_managed_ancestor_through_parent_components() {
        let tmp = TempDir::new().unwrap();
        TrackingRecord::initialize(tmp.path()).unwrap();

        // Unnormalized, "child/../child2" has no managed literal ancestor;
        // normalized, tmp itself is one.
        let root = tmp.path().join("child").join("..").join("child2");
        let err = store_error(TrackingRecord::initialize(&root).unwrap_err());
        assert!(matches!(err, StoreError::AlreadyManaged { .. }));
    }

    #[test]
    fn load_requires_tracking_file() {
        let tmp = TempDir::new().unwrap();
        let err = store_error(TrackingRecord::load(tmp.path()).unwrap_err());
        assert!(matches!(err, StoreError::NotManaged { .. }));
    }

    #[test]
    fn save_requires_tracking_file() {
        let tmp = TempDir::new().unwrap();
        let record = TrackingRecord::initialize(tmp.path()).unwrap();
        std::fs::remove_file(tmp.path().join(TRACK_FILE)).unwrap();

        let err = store_error(record.save().unwrap_err());
        assert!(matches!(err, StoreError::NotManaged { .. }));
    }

    #[test]
    fn entries_round_trip_through_disk() {
        let tmp = TempDir::new().unwrap();
        let mut record = TrackingRecord::initialize(tmp.path()).unwrap();

        let entry = record.entry_mut_or_default("foo");
        entry.remotes.insert("origin".into(), "https://example.com/foo.git".into());
        entry.remotes.insert("mirror".into(), "https://mirror.example.com/foo.git".into());
        record
            .entry_mut_or_default("sub/bar")
            .remotes
            .insert("origin".into(), "https://example.com/bar.git".into());
        record.save().unwrap();

        let loaded = TrackingRecord::load(tmp.path()).unwrap();
        assert_eq!(loaded.len(), 2);
        let foo = loaded.entry("foo").unwrap();
        assert_eq!(foo.remotes.get("origin").unwrap(), "https://example.com/foo.git");
        assert_eq!(
            foo.remotes.get("mirror").unwrap(),
            "https://mirror.example.com/foo.git"
        );
        let bar = loaded.entry("sub/bar").unwrap();
        assert_eq!(bar.remotes.get("origin").unwrap(), "https://example.com/bar.git");
    }

    #[test]
    fn tracking_file_uses_remote_prefixed_keys() {
        let tmp = TempDir::new().unwrap();
        let mut record = TrackingRecord::initialize(tmp.path()).unwrap();
        record
            .entry_mut_or_default("foo")
            .remotes
            .insert("origin".into(), "u1".into());
        record.save().unwrap();

        let text = std::fs::read_to_string(tmp.path().join(TRACK_FILE)).unwrap();
        assert!(text.contains("remote_origin"));
        assert!(text.contains("u1"));
    }

    #[test]
    fn remove_drops_the_entry() {
        let tmp = TempDir::new().unwrap();
        let mut record = TrackingRecord::initialize(tmp.path()).unwrap();
        record
            .entry_mut_or_default("foo")
            .remotes
            .insert("origin".into(), "u1".into());

        assert!(record.remove("foo").is_some());
        assert!(record.remove("foo").is_none());
        assert!(record.is_empty());
    }
}
